//! WASM-compatible wrapper for slide template generation.
//!
//! This crate exposes deck generation to JavaScript for use in Cloudflare
//! Workers. Errors are thrown as strings.

use deck_core::presets::{BODY_FONTS, TITLE_FONTS};
use deck_core::{ImageAsset, LayoutKind, TemplateConfig, THEME_PRESETS};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Metadata of a generated deck. The bytes travel separately as `data`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    /// Suggested download name, e.g. "我的PPT模板_模板.pptx".
    pub file_name: String,
    pub page_count: usize,
    /// Canvas size in inches.
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Layout key of each page, in order.
    pub layouts: Vec<String>,
}

/// Fonts offered for titles and body text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontLists {
    pub title_fonts: &'static [&'static str],
    pub body_fonts: &'static [&'static str],
}

/// One entry of the layout catalogue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub default_count: u32,
}

/// Generate a deck.
///
/// # Arguments
/// * `config_json` - Configuration document; an empty string means defaults
/// * `logo` - Optional logo image bytes
/// * `images` - Array of `Uint8Array` images for image-text pages, in order
///
/// # Returns
/// `{ fileName, pageCount, canvasWidth, canvasHeight, layouts, data }` where
/// `data` is a `Uint8Array` holding the .pptx file.
#[wasm_bindgen]
pub fn generate_deck(
    config_json: &str,
    logo: Option<Vec<u8>>,
    images: js_sys::Array,
) -> Result<JsValue, JsValue> {
    let images = images_from_js(&images)?;
    let (result, bytes) = generate_deck_impl(config_json, logo.as_deref(), &images)
        .map_err(|e| JsValue::from_str(&e))?;

    let value = serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
    let data = js_sys::Uint8Array::from(bytes.as_slice());
    js_sys::Reflect::set(&value, &JsValue::from_str("data"), &data)?;
    Ok(value)
}

/// The default configuration document as pretty-printed JSON.
#[wasm_bindgen]
pub fn default_config() -> Result<String, JsValue> {
    TemplateConfig::default()
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The theme presets: name, colors, fonts and description.
#[wasm_bindgen]
pub fn list_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(THEME_PRESETS)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// The nine layout kinds with display names and default page counts.
#[wasm_bindgen]
pub fn list_layouts() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&layout_catalogue())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// The title and body font choices.
#[wasm_bindgen]
pub fn list_fonts() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&font_lists())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn font_lists() -> FontLists {
    FontLists {
        title_fonts: TITLE_FONTS,
        body_fonts: BODY_FONTS,
    }
}

fn images_from_js(images: &js_sys::Array) -> Result<Vec<ImageAsset>, JsValue> {
    images
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let bytes = value
                .dyn_into::<js_sys::Uint8Array>()
                .map_err(|_| JsValue::from_str(&format!("Image {} is not a Uint8Array", index + 1)))?;
            Ok(ImageAsset::new(format!("image{}", index + 1), bytes.to_vec()))
        })
        .collect()
}

fn generate_deck_impl(
    config_json: &str,
    logo: Option<&[u8]>,
    images: &[ImageAsset],
) -> Result<(GenerateResult, Vec<u8>), String> {
    let config = if config_json.trim().is_empty() {
        TemplateConfig::default()
    } else {
        TemplateConfig::from_json(config_json).map_err(|e| e.to_string())?
    };

    let built = deck_pptx::generate(&config.theme, &config.layouts, logo, images)
        .map_err(|e| e.to_string())?;

    let result = GenerateResult {
        file_name: deck_core::output_file_name(&config.theme.template_name),
        page_count: built.page_count,
        canvas_width: built.canvas.width,
        canvas_height: built.canvas.height,
        layouts: built.kinds.iter().map(|kind| kind.key().to_string()).collect(),
    };
    Ok((result, built.output))
}

fn layout_catalogue() -> Vec<LayoutEntry> {
    LayoutKind::ALL
        .iter()
        .map(|kind| {
            let info = kind.info();
            LayoutEntry {
                key: kind.key(),
                name: info.name,
                description: info.description,
                default_count: info.default_count,
            }
        })
        .collect()
}
