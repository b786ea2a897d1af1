//! Browser adapter tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use love_story::browser::{DomView, LocalStorage};
use love_story::model::store::{KeyValueStore, SnapshotStore};
use love_story::routes::stories::UploadedFile;
use love_story::view::View;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let storage = LocalStorage::open();
    storage.set("loveStoryTest", "{\"a\":1}").unwrap();
    assert_eq!(storage.get("loveStoryTest").unwrap().as_deref(), Some("{\"a\":1}"));
    storage.remove("loveStoryTest").unwrap();
    assert_eq!(storage.get("loveStoryTest").unwrap(), None);
}

#[wasm_bindgen_test]
fn snapshot_store_over_local_storage() {
    let store = SnapshotStore::new(LocalStorage::open(), "loveStoryWebTest".to_string());
    store.save("{}").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[wasm_bindgen_test]
fn dom_view_writes_page_elements() {
    let mut view = DomView::new().unwrap();
    let doc = view.document().clone();
    let fixture = doc.create_element("div").unwrap();
    fixture.set_inner_html(r#"<p id="heroTitle"></p><div id="adminPanel"></div><input id="partner1">"#);
    doc.body().unwrap().append_child(&fixture).unwrap();

    view.set_text("heroTitle", "Ana & Luis");
    view.toggle_class("adminPanel", "open");
    view.set_value("partner1", "Ana");
    view.set_theme("nature");

    let title = doc.get_element_by_id("heroTitle").unwrap();
    assert_eq!(title.text_content().as_deref(), Some("Ana & Luis"));
    let panel = doc.get_element_by_id("adminPanel").unwrap();
    assert!(panel.class_list().contains("open"));
    assert_eq!(
        doc.body().unwrap().get_attribute("data-theme").as_deref(),
        Some("nature")
    );
    fixture.remove();
}

#[wasm_bindgen_test]
fn theme_buttons_mark_only_the_active_one() {
    let mut view = DomView::new().unwrap();
    let doc = view.document().clone();
    let fixture = doc.create_element("div").unwrap();
    fixture.set_inner_html(
        r#"<button id="themeModern" class="theme-option active" data-theme="modern"></button><button id="themeNature" class="theme-option" data-theme="nature"></button>"#,
    );
    doc.body().unwrap().append_child(&fixture).unwrap();

    view.mark_active_theme("nature");

    let modern = doc.get_element_by_id("themeModern").unwrap();
    let nature = doc.get_element_by_id("themeNature").unwrap();
    assert!(!modern.class_list().contains("active"));
    assert!(nature.class_list().contains("active"));
    fixture.remove();
}

#[wasm_bindgen_test]
fn missing_elements_are_skipped() {
    let mut view = DomView::new().unwrap();
    view.set_text("doesNotExist", "x");
    view.set_class("doesNotExist", "open", true);
}

#[wasm_bindgen_test]
async fn uploaded_file_reads_its_bytes() {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(&[1u8, 2, 3][..]));
    let file = web_sys::File::new_with_u8_array_sequence(&parts, "photo.png").unwrap();
    assert_eq!(file.read_bytes().await.unwrap(), vec![1, 2, 3]);
}
