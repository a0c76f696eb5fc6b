use retrodesk_core::persistence::{STATE_KEY, decode_state};
use retrodesk_core::{
    Applet, Bounds, FileStorage, MemoryStorage, StateStorage, Viewport, WindowContent,
    WindowManager, WindowSpec, register_builtin_applets,
};
use tempfile::TempDir;

fn window_a() -> WindowSpec {
    WindowSpec::new("Window A", WindowContent::component("PanelA")).with_id("a")
}

fn window_b() -> WindowSpec {
    WindowSpec::new("Window B", WindowContent::markup("<p>b</p>")).with_id("b")
}

fn fresh_manager(storage: impl StateStorage + 'static) -> WindowManager {
    let mut manager = WindowManager::new(storage);
    manager.register_window_creator("a", window_a);
    manager.register_window_creator("b", window_b);
    manager
}

#[test]
fn reload_preserves_geometry_flags_and_stacking() {
    let storage = MemoryStorage::new();

    let mut first = fresh_manager(storage.clone());
    first.create_window(window_a());
    first.create_window(window_b());
    first.move_window("a", 40, 60);
    first.resize_window("a", 320, 240);
    first.minimize_window("a");
    first.move_window("b", -10, 300);
    first.resize_window("b", 500, 420);
    first.focus_window("b");
    first.save_window_state();

    let a_before = first.window("a").cloned().unwrap();
    let b_before = first.window("b").cloned().unwrap();
    assert!(b_before.z_index > a_before.z_index);

    let mut second = fresh_manager(storage);
    assert!(second.windows().is_empty());
    second.load_window_state();

    let a = second.window("a").unwrap();
    let b = second.window("b").unwrap();

    assert_eq!(
        a.bounds(),
        Bounds {
            x: 40,
            y: 60,
            width: 320,
            height: 240
        }
    );
    assert!(a.is_minimized);
    assert_eq!(
        b.bounds(),
        Bounds {
            x: -10,
            y: 300,
            width: 500,
            height: 420
        }
    );
    assert!(!b.is_minimized);
    assert!(b.z_index > a.z_index, "relative stacking order preserved");
    assert_eq!(second.active_window_id(), Some("b"));
    assert_eq!(second.visible_windows().len(), 1);
}

#[test]
fn reload_restores_maximized_window_and_its_bounds() {
    let storage = MemoryStorage::new();

    let mut first = fresh_manager(storage.clone()).with_viewport(Viewport::new(1024, 768));
    first.create_window(window_a());
    first.move_window("a", 15, 25);
    first.maximize_window("a");

    let mut second = fresh_manager(storage);
    second.load_window_state();

    let a = second.window("a").unwrap();
    assert!(a.is_maximized);
    assert_eq!((a.width, a.height), (1024, 768));

    second.maximize_window("a");
    let a = second.window("a").unwrap();
    assert!(!a.is_maximized);
    assert_eq!((a.x, a.y), (15, 25));
    assert_eq!((a.width, a.height), (400, 300));
}

#[test]
fn reload_skips_unregistered_window_but_keeps_others() {
    let storage = MemoryStorage::new();

    let mut first = fresh_manager(storage.clone());
    first.create_window(window_a());
    first.create_window(
        WindowSpec::new("Scratch", WindowContent::markup("tmp")).with_id("scratch"),
    );
    first.create_window(window_b());

    let mut second = fresh_manager(storage);
    second.load_window_state();

    let ids: Vec<&str> = second.windows().iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn saved_record_uses_documented_layout() {
    let storage = MemoryStorage::new();
    let mut manager = fresh_manager(storage.clone());
    manager.create_window(window_a());
    manager.create_window(window_b());

    let raw = storage.get(STATE_KEY).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["activeWindowId"], "b");
    assert_eq!(json["zIndexCounter"], 1002);
    assert_eq!(json["windows"][0]["contentType"], "component");
    assert_eq!(json["windows"][0]["contentData"], "a");
    assert_eq!(json["windows"][1]["contentType"], "string");
    assert_eq!(json["windows"][1]["contentData"], "<p>b</p>");
}

#[test]
fn file_storage_roundtrip_with_builtin_applets() {
    let temp_dir = TempDir::new().unwrap();

    let mut first = WindowManager::new(FileStorage::new(temp_dir.path()));
    register_builtin_applets(&mut first);
    first.create_window(Applet::Calculator.spec());
    first.create_window(Applet::Notepad.spec());
    first.move_window("calculator", 5, 6);

    let saved =
        std::fs::read_to_string(temp_dir.path().join("window_manager_state.json")).unwrap();
    let state = decode_state(&saved).unwrap();
    assert_eq!(state.windows.len(), 2);

    let mut second = WindowManager::new(FileStorage::new(temp_dir.path()));
    register_builtin_applets(&mut second);
    second.load_window_state();

    let calculator = second.window("calculator").unwrap();
    assert_eq!((calculator.x, calculator.y), (5, 6));
    assert_eq!(calculator.content, WindowContent::component("Calculator"));
    assert_eq!(second.active_window_id(), Some("notepad"));
}

#[test]
fn corrupt_file_loads_as_empty_desktop() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("window_manager_state.json"),
        "{\"windows\": [",
    )
    .unwrap();

    let mut manager = WindowManager::new(FileStorage::new(temp_dir.path()));
    register_builtin_applets(&mut manager);
    manager.load_window_state();

    assert!(manager.windows().is_empty());
    assert_eq!(manager.active_window_id(), None);
}
