use crate::constants::{ATTR_LINK_DISTANCE, ATTR_PARTICLE_COUNT, MAX_PARTICLE_COUNT};
use anyhow::Context;
use folio_core::FieldConfig;
use std::str::FromStr;
use web_sys as web;

/// Field config with overrides from the canvas' `data-*` attributes.
/// A bad override is logged and the default kept.
pub fn field_config(canvas: &web::Element) -> FieldConfig {
    let mut cfg = FieldConfig::default();
    match read_attr::<usize>(canvas, ATTR_PARTICLE_COUNT) {
        Ok(Some(n)) if n <= MAX_PARTICLE_COUNT => cfg.particle_count = n,
        Ok(Some(n)) => log::warn!(
            "[field] {ATTR_PARTICLE_COUNT}={n} exceeds {MAX_PARTICLE_COUNT}, using {}",
            cfg.particle_count
        ),
        Ok(None) => {}
        Err(e) => log::warn!("[field] {e:#}"),
    }
    match read_attr::<f32>(canvas, ATTR_LINK_DISTANCE) {
        Ok(Some(d)) => {
            let candidate = FieldConfig {
                link_distance: d,
                ..cfg.clone()
            };
            match candidate.validate() {
                Ok(()) => cfg = candidate,
                Err(e) => log::warn!("[field] ignoring {ATTR_LINK_DISTANCE}: {e}"),
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("[field] {e:#}"),
    }
    cfg
}

fn read_attr<T>(el: &web::Element, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = el.get_attribute(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .with_context(|| format!("invalid {name}={raw:?}"))
}
