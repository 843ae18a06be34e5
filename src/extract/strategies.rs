//! Fallback strategies
//!
//! Each strategy is a pure, named function over a [`PageSnapshot`]. A field's
//! chain is tried in order and the first present value wins:
//! - `spec_block` reads the "Especificações Técnicas" panel
//! - `heading`, `breadcrumb` and `title_pattern` read page furniture
//! - `size_selector` and `technical_info` read the flat-catalog product form
//! - `page_text_scan`, `url_segment` and `timestamp_placeholder` are last resorts

use super::format::extract_format;
use super::record::Field;
use super::sanitize::{percent_decode, title_case};
use super::snapshot::{element_text, own_text, PageSnapshot};
use crate::url::path_segments;
use crate::vendor::VendorGrammar;
use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

/// A named extraction strategy
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&PageSnapshot) -> Option<String>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Strategy").field(&self.name).finish()
    }
}

pub const PRODUCT_CHAIN: &[Strategy] = &[
    Strategy { name: "spec_block", run: spec_block_product },
    Strategy { name: "heading", run: product_heading },
    Strategy { name: "breadcrumb", run: breadcrumb },
    Strategy { name: "title_pattern", run: title_pattern },
    Strategy { name: "url_segment", run: url_segment },
    Strategy { name: "timestamp_placeholder", run: timestamp_placeholder },
];

pub const FORMAT_CHAIN: &[Strategy] = &[
    Strategy { name: "spec_block", run: spec_block_format },
    Strategy { name: "size_selector", run: size_selector },
    Strategy { name: "technical_info", run: technical_info_format },
    Strategy { name: "page_text_scan", run: page_text_scan },
];

pub const MATERIAL_CHAIN: &[Strategy] = &[Strategy {
    name: "spec_block",
    run: spec_block_material,
}];

pub const SURFACE_CHAIN: &[Strategy] = &[
    Strategy { name: "spec_block", run: spec_block_surface },
    Strategy { name: "technical_info", run: technical_info_finish },
];

pub const REFERENCE_CHAIN: &[Strategy] = &[Strategy {
    name: "spec_block",
    run: spec_block_reference,
}];

pub const ENVIRONMENT_CHAIN: &[Strategy] = &[Strategy {
    name: "external_marker",
    run: external_marker,
}];

/// Default chain for a field
pub fn default_chain(field: Field) -> &'static [Strategy] {
    match field {
        Field::Product => PRODUCT_CHAIN,
        Field::Format => FORMAT_CHAIN,
        Field::Material => MATERIAL_CHAIN,
        Field::Surface => SURFACE_CHAIN,
        Field::Reference => REFERENCE_CHAIN,
        Field::Environment => ENVIRONMENT_CHAIN,
    }
}

const SPEC_BLOCK_MARKER: &str = "especificações técnicas";
const SPEC_LABEL_SELECTOR: &str = "h6.font-weight-light.texto-padrao.text-uppercase";
const SPEC_VALUE_SELECTOR: &str = "span.font-weight-light.fw-bold";
const TECH_INFO_ITEM_SELECTOR: &str =
    "section.product__technical__informations__container.active li";
const TECH_INFO_NAME_SELECTOR: &str = "span.product__technical__informations__name";
const TECH_INFO_VALUE_SELECTOR: &str = "span.product__technical__informations__value";
const FORMAT_LABELS: [&str; 4] = ["formato", "tamanho", "dimensão", "dimensao"];
const FINISH_LABELS: [&str; 1] = ["acabamento"];
const EXTERNAL_MARKER: &str = "externo";

fn spec_block_product(page: &PageSnapshot) -> Option<String> {
    spec_field(page, Field::Product)
}

fn spec_block_format(page: &PageSnapshot) -> Option<String> {
    spec_field(page, Field::Format)
}

fn spec_block_material(page: &PageSnapshot) -> Option<String> {
    spec_field(page, Field::Material)
}

fn spec_block_surface(page: &PageSnapshot) -> Option<String> {
    spec_field(page, Field::Surface)
}

fn spec_block_reference(page: &PageSnapshot) -> Option<String> {
    spec_field(page, Field::Reference)
}

/// Maps a specification label to the single field it fills
///
/// Labels are checked in a fixed order, so "Referência do produto" counts
/// as the product label.
fn spec_label_field(label: &str) -> Option<Field> {
    let label = label.to_lowercase();
    if label.contains("produto") {
        Some(Field::Product)
    } else if label.contains("formato") {
        Some(Field::Format)
    } else if label.contains("material") {
        Some(Field::Material)
    } else if label.contains("superfície") || label.contains("superficie") {
        Some(Field::Surface)
    } else if label.contains("referência") || label.contains("referencia") {
        Some(Field::Reference)
    } else {
        None
    }
}

/// The element two levels above the "Especificações Técnicas" text
fn find_spec_block(page: &PageSnapshot) -> Option<ElementRef<'_>> {
    page.html()
        .tree
        .root()
        .descendants()
        .find(|node| {
            node.value()
                .as_text()
                .map(|text| text.to_lowercase().contains(SPEC_BLOCK_MARKER))
                .unwrap_or(false)
        })
        .and_then(|node| node.parent())
        .and_then(|label| label.parent())
        .and_then(ElementRef::wrap)
}

/// Label/value pairs of the specification block in reading order
///
/// The first value seen for a field is kept; a later label that maps to the
/// same field (such as "Código do produto" after "Produto") is ignored.
pub fn spec_block_fields(page: &PageSnapshot) -> Vec<(Field, String)> {
    let Some(block) = find_spec_block(page) else {
        return Vec::new();
    };
    let Ok(label_selector) = scraper::Selector::parse(SPEC_LABEL_SELECTOR) else {
        return Vec::new();
    };

    let mut fields: Vec<(Field, String)> = Vec::new();
    for label in block.select(&label_selector) {
        let Some(field) = spec_label_field(&element_text(label)) else {
            continue;
        };
        if fields.iter().any(|(seen, _)| *seen == field) {
            continue;
        }
        let value = page
            .next_matching(label, SPEC_VALUE_SELECTOR)
            .map(element_text)
            .filter(|value| !value.is_empty());
        if let Some(value) = value {
            fields.push((field, value));
        }
    }
    fields
}

fn spec_field(page: &PageSnapshot, field: Field) -> Option<String> {
    let fields = spec_block_fields(page);
    if !fields.is_empty() {
        return fields
            .into_iter()
            .find(|(found, _)| *found == field)
            .map(|(_, value)| value);
    }
    loose_spec_field(page, field)
}

/// Without a specification block, any `h6` mentioning the label is
/// followed to the next `span`
fn loose_spec_field(page: &PageSnapshot, field: Field) -> Option<String> {
    let keyword = match field {
        Field::Product => "produto",
        Field::Format => "formato",
        _ => return None,
    };

    let label = page
        .select("h6")
        .into_iter()
        .find(|h6| element_text(*h6).to_lowercase().contains(keyword))?;
    page.next_matching(label, "span")
        .map(element_text)
        .filter(|value| !value.is_empty())
}

fn parenthesized() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\((.*?)\)").expect("parenthesis pattern is valid"))
}

fn product_heading(page: &PageSnapshot) -> Option<String> {
    if let Some(title) = page.first_text("h2.product__title") {
        let sub_name = parenthesized()
            .captures(&title)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty());
        return Some(sub_name.unwrap_or(title));
    }
    page.first_text(".product-name, .product-title, h1")
}

fn breadcrumb(page: &PageSnapshot) -> Option<String> {
    page.first_text("nav#timeline li.breadcrumb-item.active")
}

fn title_words() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([A-Za-zÀ-ÖØ-öø-ÿ]+\s+-\s+[A-Za-zÀ-ÖØ-öø-ÿ]+)")
            .expect("title pattern is valid")
    })
}

fn title_pattern(page: &PageSnapshot) -> Option<String> {
    let title = page.first_text("title")?;
    title_words()
        .find(&title)
        .map(|found| found.as_str().to_string())
}

/// Parent segment for hierarchical URLs, the slug itself for flat ones
fn url_segment(page: &PageSnapshot) -> Option<String> {
    let segments = path_segments(page.url().path());
    let segment = match page.vendor().grammar() {
        VendorGrammar::Hierarchical if segments.len() >= 2 => segments[segments.len() - 2],
        VendorGrammar::Flat => *segments.last()?,
        VendorGrammar::Hierarchical => return None,
    };
    let words = percent_decode(segment).replace('-', " ");
    let name = title_case(&words);
    (!name.is_empty()).then_some(name)
}

fn timestamp_placeholder(page: &PageSnapshot) -> Option<String> {
    Some(format!("Produto {}", page.captured_at().timestamp()))
}

fn size_selector(page: &PageSnapshot) -> Option<String> {
    let buttons = page.select("label.product__sizes__button");
    let active = buttons.iter().find(|button| {
        button
            .value()
            .attr("class")
            .map(|class| class.split_whitespace().any(|c| c == "active"))
            .unwrap_or(false)
    });
    active
        .or_else(|| buttons.first())
        .map(|button| element_text(*button))
        .filter(|text| !text.is_empty())
}

/// Value of the first active technical-info item whose label matches
fn technical_info(page: &PageSnapshot, labels: &[&str]) -> Option<String> {
    let name_selector = scraper::Selector::parse(TECH_INFO_NAME_SELECTOR).ok()?;
    let value_selector = scraper::Selector::parse(TECH_INFO_VALUE_SELECTOR).ok()?;

    page.select(TECH_INFO_ITEM_SELECTOR)
        .into_iter()
        .find_map(|item| {
            let name = item.select(&name_selector).next()?;
            let label = own_text(name).to_lowercase();
            if !labels.contains(&label.as_str()) {
                return None;
            }
            let value = item.select(&value_selector).next().map(element_text)?;
            (!value.is_empty()).then_some(value)
        })
}

fn technical_info_format(page: &PageSnapshot) -> Option<String> {
    technical_info(page, &FORMAT_LABELS)
}

fn technical_info_finish(page: &PageSnapshot) -> Option<String> {
    technical_info(page, &FINISH_LABELS)
}

fn page_text_scan(page: &PageSnapshot) -> Option<String> {
    page.visible_texts().into_iter().find_map(extract_format)
}

fn external_marker(page: &PageSnapshot) -> Option<String> {
    let in_url = page.url().as_str().to_lowercase().contains(EXTERNAL_MARKER);
    let in_source = page.source().to_lowercase().contains(EXTERNAL_MARKER);
    (in_url || in_source).then(|| "Externo".to_string())
}
