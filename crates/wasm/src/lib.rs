use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use folio_posts::{CompileOptions, DEFAULT_EXCERPT_MAX_LENGTH};

// ============================================================================
// Compile Config
// ============================================================================

/// Configuration accepted by the WASM compile functions.
/// Mirrors the options of `folio_posts::compile_post`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmCompileConfig {
    #[serde(default, alias = "excerptMaxLength")]
    pub excerpt_max_length: Option<usize>,
}

fn parse_config(config: JsValue) -> WasmCompileConfig {
    if config.is_undefined() || config.is_null() {
        return WasmCompileConfig::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_default()
}

fn build_compile_options(cfg: &WasmCompileConfig) -> CompileOptions {
    CompileOptions {
        excerpt_max_length: cfg.excerpt_max_length.unwrap_or(DEFAULT_EXCERPT_MAX_LENGTH),
    }
}

// ============================================================================
// Render API
// ============================================================================

/// Renders the supported Markdown subset to an HTML fragment.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(input: &str) -> String {
    folio_core::render_markdown(input)
}

/// Derives a plain-text excerpt of at most `max_length` characters from a
/// Markdown body.
#[wasm_bindgen(js_name = documentExcerpt)]
pub fn document_excerpt(body: &str, max_length: usize) -> String {
    folio_core::excerpt(body, max_length)
}

// ============================================================================
// Document API
// ============================================================================

/// Splits a document into frontmatter and body.
///
/// Returns `{ frontmatter, body }` where `frontmatter` is a plain object
/// mapping keys to strings or arrays of strings.
#[wasm_bindgen(js_name = parseDocument)]
pub fn parse_document(source: &str) -> Result<JsValue, JsError> {
    let doc = folio_core::parse_document(source);
    let result = serde_json::json!({
        "frontmatter": doc.frontmatter.to_json(),
        "body": doc.body,
    });

    // json_compatible keeps nested maps as plain objects instead of ES Maps.
    result
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Compiles one Markdown document into a post object.
///
/// # Arguments
///
/// * `source_id` - Fallback id, typically the source file stem
/// * `source` - The raw document contents
/// * `config` - Optional configuration (JsValue)
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { compilePost } from './folio_wasm';
///
/// const post = compilePost('hello', '---\ntitle: Hello\n---\nBody.', {
///   excerptMaxLength: 120,
/// });
/// // post = { id: 'hello', title: 'Hello', order: 0, tags: [],
/// //          excerpt: 'Body.', html: '<p>Body.</p>' }
/// ```
#[wasm_bindgen(js_name = compilePost)]
pub fn compile_post(source_id: &str, source: &str, config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config);
    let options = build_compile_options(&cfg);

    let post = folio_posts::compile_post(source_id, source, &options)
        .map_err(|e| JsError::new(&format!("Compile error: {}", e)))?;

    serde_wasm_bindgen::to_value(&post)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
