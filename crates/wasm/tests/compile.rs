use folio_wasm::{compile_post, document_excerpt, parse_document, render_markdown};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Post {
    id: String,
    title: String,
    order: i64,
    date: Option<String>,
    author: Option<String>,
    tags: Vec<String>,
    excerpt: String,
    cover: Option<String>,
    cover_alt: Option<String>,
    html: String,
}

#[derive(Deserialize, Debug)]
struct ParsedDoc {
    frontmatter: serde_json::Value,
    body: String,
}

#[derive(Serialize)]
struct TestConfig {
    #[serde(rename = "excerptMaxLength")]
    excerpt_max_length: usize,
}

#[wasm_bindgen_test]
fn renders_markdown_subset() {
    assert_eq!(
        render_markdown("**bold** and *italic*"),
        "<p><strong>bold</strong> and <em>italic</em></p>"
    );
    assert_eq!(
        render_markdown("```js\nlet x = 1 < 2;\n```"),
        "<pre class=\"language-js\"><code class=\"language-js\">let x = 1 &lt; 2;</code></pre>"
    );
}

#[wasm_bindgen_test]
fn derives_excerpts() {
    assert_eq!(
        document_excerpt("This is a long sentence that exceeds the limit", 10),
        "This is a…"
    );
    assert_eq!(document_excerpt("Short.", 100), "Short.");
}

#[wasm_bindgen_test]
fn parses_document_into_frontmatter_and_body() {
    let result = parse_document("---\ntitle: Hello\ntags: [a, b]\n---\nBody text.")
        .expect("parse should succeed");

    let doc: ParsedDoc = serde_wasm_bindgen::from_value(result).expect("deserialize result");
    assert_eq!(doc.body, "Body text.");
    assert_eq!(doc.frontmatter["title"], serde_json::json!("Hello"));
    assert_eq!(doc.frontmatter["tags"], serde_json::json!(["a", "b"]));
}

#[wasm_bindgen_test]
fn compiles_post_with_default_config() {
    let result = compile_post(
        "hello",
        "---\ntitle: Hello\n---\nBody.",
        JsValue::UNDEFINED,
    )
    .expect("compile should succeed");

    let post: Post = serde_wasm_bindgen::from_value(result).expect("deserialize result");
    assert_eq!(post.id, "hello");
    assert_eq!(post.title, "Hello");
    assert_eq!(post.order, 0);
    assert!(post.date.is_none());
    assert!(post.author.is_none());
    assert!(post.tags.is_empty());
    assert!(post.cover.is_none());
    assert!(post.cover_alt.is_none());
    assert_eq!(post.excerpt, "Body.");
    assert_eq!(post.html, "<p>Body.</p>");
}

#[wasm_bindgen_test]
fn compile_config_controls_excerpt_length() {
    let config = serde_wasm_bindgen::to_value(&TestConfig {
        excerpt_max_length: 10,
    })
    .expect("serialize config");

    let result = compile_post(
        "p",
        "---\ntitle: T\n---\nThis is a long sentence that exceeds the limit",
        config,
    )
    .expect("compile should succeed");

    let post: Post = serde_wasm_bindgen::from_value(result).expect("deserialize result");
    assert_eq!(post.excerpt, "This is a…");
}

#[wasm_bindgen_test]
fn missing_title_is_an_error() {
    assert!(compile_post("p", "no title anywhere", JsValue::NULL).is_err());
}
