use crate::constants::DARK_CLASS;
use folio_core::{ParticleField, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[inline]
pub fn current(document: &web::Document) -> Theme {
    let dark = document
        .document_element()
        .map(|el| el.class_list().contains(DARK_CLASS))
        .unwrap_or(false);
    Theme::from_dark(dark)
}

/// Toggle the page's dark class and the particle layer's opacity together.
pub fn apply(document: &web::Document, field: Option<&Rc<RefCell<ParticleField>>>, theme: Theme) {
    if let Some(root) = document.document_element() {
        let cl = root.class_list();
        _ = if theme.is_dark() {
            cl.add_1(DARK_CLASS)
        } else {
            cl.remove_1(DARK_CLASS)
        };
    }
    if let Some(field) = field {
        field.borrow_mut().set_theme(theme);
    }
    log::info!("[theme] {:?}", theme);
}
