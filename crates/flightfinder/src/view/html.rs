//! HTML fragments for a DOM host.
//!
//! Every piece of record text is escaped. Cards and popup items carry a
//! `data-id` attribute so the host can delegate events by id.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::{
    money, CardList, CardView, DetailView, ImageView, EMPTY_HINT, EMPTY_TITLE, IMAGE_FALLBACK,
};
use crate::map::{MarkerIcon, Popup};

/// Separator drawn between items of a multi-experience popup.
pub const POPUP_SEPARATOR: &str =
    r#"<hr style="margin: 8px 0; border: none; border-top: 1px solid #eee;">"#;

/// The list view: every card, or the empty-state placeholder.
#[must_use]
pub fn card_list(list: &CardList, currency: &str) -> String {
    match list {
        CardList::Empty => format!(
            r#"<div class="empty-state"><h3>{}</h3><p>{}</p></div>"#,
            text(EMPTY_TITLE),
            text(EMPTY_HINT)
        ),
        CardList::Cards(cards) => cards.iter().map(|c| card(c, currency)).collect(),
    }
}

/// One list-view card.
#[must_use]
pub fn card(card: &CardView, currency: &str) -> String {
    let mut classes = String::from("experience-card");
    if card.over_budget {
        classes.push_str(" over-budget");
    }
    if card.highlighted {
        classes.push_str(" highlighted");
    }

    let badges: String = card
        .badges(currency)
        .iter()
        .map(|badge| {
            let modifier = match badge.as_str() {
                "🔄 Aerobatics" => " aerobatics",
                "🎮 Take Controls" => " controls",
                "Over Budget" => " over-budget",
                _ => "",
            };
            format!(r#"<span class="meta-badge{modifier}">{}</span>"#, text(badge))
        })
        .collect();

    format!(
        concat!(
            r#"<article class="{classes}" data-id="{id}">"#,
            "{image}",
            r#"<div class="card-content">"#,
            r#"<div class="card-header"><h3 class="card-title">{title}</h3>"#,
            r#"<span class="card-price">{price}</span></div>"#,
            r#"<p class="card-aircraft">{aircraft}</p>"#,
            r#"<div class="card-meta">{badges}</div>"#,
            r#"<p class="card-landmarks">📍 {landmarks}</p>"#,
            r#"<div class="card-footer"><span class="card-operator">{operator}</span>"#,
            r#"<span class="card-drive">{drive}</span></div>"#,
            "</div></article>"
        ),
        classes = classes,
        id = card.id,
        image = image(&card.image, "card-image", true),
        title = text(&card.title),
        price = text(&card.price_label(currency)),
        aircraft = text(&card.aircraft),
        badges = badges,
        landmarks = text(&card.landmarks),
        operator = text(&card.operator),
        drive = text(&card.drive_label()),
    )
}

/// The detail view body.
#[must_use]
pub fn detail(detail: &DetailView, currency: &str) -> String {
    let facts: String = detail
        .facts(currency)
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="detail-item"><div class="detail-label">{}</div><div class="detail-value">{}</div></div>"#,
                text(label),
                text(value)
            )
        })
        .collect();

    format!(
        concat!(
            "{image}",
            r#"<div class="modal-body">"#,
            r#"<h2 class="modal-title">{title}</h2>"#,
            r#"<p class="modal-aircraft">{aircraft}</p>"#,
            r#"<div class="modal-details">{facts}</div>"#,
            r#"<div class="modal-landmarks"><h4>Landmarks &amp; Sights</h4><p>{landmarks}</p></div>"#,
            r#"<div class="modal-notes"><strong>Notes:</strong> {notes}</div>"#,
            r#"<div class="modal-meta"><strong>Location:</strong> {location}<br>"#,
            r#"<strong>Operator:</strong> {operator}<br>"#,
            r#"<strong>Availability:</strong> {availability}</div>"#,
            r#"<a href="{website}" target="_blank" rel="noopener noreferrer" class="modal-cta">Visit Website →</a>"#,
            r#"<p class="modal-credit">Image: {credit}</p>"#,
            "</div>"
        ),
        image = image(&detail.image, "modal-image", false),
        title = text(&detail.title),
        aircraft = text(&detail.aircraft),
        facts = facts,
        landmarks = text(&detail.landmarks),
        notes = text(&detail.notes),
        location = text(&detail.location),
        operator = text(&detail.operator),
        availability = text(&detail.availability),
        website = attr(&detail.website),
        credit = text(&detail.image_credit),
    )
}

/// Popup content for a marker.
#[must_use]
pub fn popup(popup: &Popup, currency: &str) -> String {
    match popup {
        Popup::Home { name } => format!(
            r#"<div class="popup-title">{}</div><div class="popup-info">Starting point</div>"#,
            text(name)
        ),
        Popup::Group { items } => items
            .iter()
            .map(|item| {
                format!(
                    r#"<div class="popup-item" data-id="{}"><div class="popup-title">{}</div><div class="popup-info">{} · {} min</div></div>"#,
                    item.id,
                    text(&item.name),
                    text(&money(currency, item.price)),
                    item.duration
                )
            })
            .collect::<Vec<_>>()
            .join(POPUP_SEPARATOR),
    }
}

/// The inner element of a marker icon.
#[must_use]
pub fn marker_icon(icon: &MarkerIcon) -> String {
    format!(
        r#"<div class="{}">{}</div>"#,
        icon.class(),
        text(&icon.label())
    )
}

fn image(image: &ImageView, class: &str, lazy: bool) -> String {
    if image.failed {
        return format!(
            r#"<div class="{class} image-fallback" style="background: {IMAGE_FALLBACK}"></div>"#
        );
    }
    format!(
        r#"<img class="{class}" src="{}" alt="{}"{}>"#,
        attr(&image.url),
        attr(&image.alt),
        if lazy { r#" loading="lazy""# } else { "" }
    )
}
