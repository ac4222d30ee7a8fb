use tankpad_shared::action::Action;
use tankpad_shared::config::ElementIds;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

const FULLSCREEN_BUTTON_STYLE: [(&str, &str); 9] = [
    ("position", "absolute"),
    ("top", "10px"),
    ("right", "10px"),
    ("z-index", "102"),
    ("background", "rgba(0,0,0,0.5)"),
    ("color", "white"),
    ("border", "none"),
    ("border-radius", "5px"),
    ("padding", "5px 10px"),
];

const OVERLAY_STYLE: [(&str, &str); 12] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background", "#1a1a1a"),
    ("color", "white"),
    ("display", "flex"),
    ("flex-direction", "column"),
    ("justify-content", "center"),
    ("align-items", "center"),
    ("z-index", "1000"),
];

const OVERLAY_HTML: &str = "<h2>Ukrainian Combat Tank</h2><p>Loading game...</p><p>Tap to start</p>";

/// DOM nodes the touch controls attach to.
pub struct ControlElements {
    pub game_container: HtmlElement,
    pub dpad: HtmlElement,
    /// Indexed by `Action::index`. `None` when the button couldn't be found.
    pub regions: [Option<HtmlElement>; 5],
    pub fullscreen_button: HtmlElement,
    pub overlay: HtmlElement,
    pub canvas: Option<HtmlCanvasElement>,
}

/// Create (or reuse) every element the controls need under the game container.
pub fn build(document: &Document, ids: &ElementIds) -> Result<ControlElements, JsValue> {
    let game_container = document
        .get_element_by_id(&ids.game_container)
        .ok_or_else(|| JsValue::from_str(&format!("Game container #{} not found", ids.game_container)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "Game container is not an HTML element")?;

    let touch_controls = match document.query_selector(&format!(".{}", ids.touch_controls_class))? {
        Some(existing) => existing
            .dyn_into::<HtmlElement>()
            .map_err(|_| "Touch controls container is not an HTML element")?,
        None => {
            let created = create(document, "div")?;
            created.set_class_name(&ids.touch_controls_class);
            game_container.append_child(&created)?;
            created
        }
    };
    touch_controls.set_inner_html("");

    let dpad = create(document, "div")?;
    dpad.set_class_name(&ids.dpad_class);
    for action in Action::ALL.into_iter().filter(|a| a.is_movement()) {
        dpad.append_child(&button(document, ids.region(action), action.label())?)?;
    }
    touch_controls.append_child(&dpad)?;
    touch_controls.append_child(&button(document, ids.region(Action::Fire), Action::Fire.label())?)?;

    let regions = Action::ALL.map(|action| lookup(document, ids.region(action)));

    let fullscreen_button = button(document, &ids.fullscreen, "Fullscreen")?;
    apply_style(&fullscreen_button, &FULLSCREEN_BUTTON_STYLE)?;
    game_container.append_child(&fullscreen_button)?;

    let overlay = loading_overlay(document, &ids.loading_screen)?;

    let canvas = document
        .get_element_by_id(&ids.canvas)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    if canvas.is_none() {
        log::warn!("Canvas #{} not found, canvas touch suppression skipped", ids.canvas);
    }

    Ok(ControlElements {
        game_container,
        dpad,
        regions,
        fullscreen_button,
        overlay,
        canvas,
    })
}

/// Region target by id. Absent targets are reported by the bridge once the
/// region is marked unwired.
fn lookup(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn loading_overlay(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(id) {
        return existing
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("Loading screen is not an HTML element"));
    }

    let overlay = create(document, "div")?;
    overlay.set_id(id);
    overlay.set_inner_html(OVERLAY_HTML);
    apply_style(&overlay, &OVERLAY_STYLE)?;
    document.body().ok_or("No body")?.append_child(&overlay)?;
    Ok(overlay)
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> is not an HTML element")))
}

fn button(document: &Document, id: &str, text: &str) -> Result<HtmlElement, JsValue> {
    let button = create(document, "button")?;
    button.set_id(id);
    button.set_text_content(Some(text));
    Ok(button)
}

fn apply_style(element: &HtmlElement, style: &[(&str, &str)]) -> Result<(), JsValue> {
    let declaration = element.style();
    for (property, value) in style {
        declaration.set_property(property, value)?;
    }
    Ok(())
}
