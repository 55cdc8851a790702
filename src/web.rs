//! Browser front end: renders [`Frame`]s into the DOM and feeds clicks and
//! key presses back into the [`Navigator`] as intents.
//!
//! Every render rebuilds the root container from scratch; the frog and lily
//! pad feedback is pure CSS animation keyed off classes, so nothing here has
//! to track element identity between frames.
use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::catalog::fetch_catalog;
use crate::config::GameConfig;
use crate::navigation::{Frame, Intent, Navigator, Screen};
use crate::session::{Difficulty, SessionOutcome};

const LOAD_FAILED: &str = "加载单词数据失败，请检查words.json文件是否存在且格式正确。";

const GREEN_PAD: &str = "linear-gradient(135deg, #66BB6A 0%, #388E3C 100%)";
const RED_PAD: &str = "linear-gradient(135deg, #EF5350 0%, #D32F2F 100%)";

const STYLESHEET: &str = "
.frog-crossing { font-family: sans-serif; max-width: 720px; margin: 0 auto; text-align: center; }
.frog-crossing button { cursor: pointer; margin: 6px; padding: 10px 18px; border-radius: 10px; border: none; }
.units-grid { display: flex; flex-wrap: wrap; justify-content: center; }
.river { background: #4FC3F7; border-radius: 18px; padding: 24px 12px; margin: 12px 0; }
.lily-pads { display: flex; justify-content: space-around; }
.lily-pad { cursor: pointer; width: 120px; height: 80px; border-radius: 50%; display: flex; align-items: center; justify-content: center; background: linear-gradient(135deg, #81C784 0%, #43A047 100%); transition: transform 0.3s ease; }
.current-pad { margin: 48px auto 0; width: 160px; padding: 12px; border-radius: 50%; background: #43A047; }
.frog { font-size: 40px; display: inline-block; }
.frog.jump { animation: frog-jump 0.8s cubic-bezier(0.68, -0.55, 0.27, 1.55) forwards; }
.frog.fall { animation: frog-fall 1s ease forwards; }
@keyframes frog-jump { to { transform: translateY(-140px); } }
@keyframes frog-fall { to { transform: translate(0, 100px) rotate(180deg); opacity: 0; } }
";

struct WebGame {
    nav: Navigator,
    config: GameConfig,
    doc: Document,
    root: Element,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

/// Load the catalog, mount the root container and show the start screen.
pub async fn run(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let root = ensure_root(&doc, &config.root_id)?;
    root.class_list().add_1("frog-crossing")?;
    root.set_text_content(Some("加载中…"));

    let catalog = match fetch_catalog(&config.catalog_url).await {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("{e}");
            root.set_text_content(Some(LOAD_FAILED));
            win.alert_with_message(LOAD_FAILED).ok();
            return Err(JsValue::from_str(&e.to_string()));
        }
    };
    log::info!("word catalog loaded: {} units", catalog.units().len());

    install_stylesheet(&doc)?;
    install_listeners(&doc, &root)?;
    GAME.with(|g| {
        g.replace(Some(WebGame { nav: Navigator::new(catalog), config, doc, root }));
    });
    with_game(|game| render(&game.doc, &game.root, &game.nav.frame()));
    Ok(())
}

fn ensure_root(doc: &Document, id: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let div = doc.create_element("div")?;
    div.set_id(id);
    body.append_child(&div)?;
    Ok(div)
}

fn install_stylesheet(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("frog-crossing-style").is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id("frog-crossing-style");
    style.set_text_content(Some(STYLESHEET));
    if let Some(head) = doc.head() {
        head.append_child(&style)?;
    } else if let Some(body) = doc.body() {
        body.append_child(&style)?;
    }
    Ok(())
}

fn install_listeners(doc: &Document, root: &Element) -> Result<(), JsValue> {
    // Clicks on anything carrying a data-intent attribute
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(node)) = target.closest("[data-intent]") else {
                return;
            };
            if let Some(intent) = node.get_attribute("data-intent").as_deref().and_then(parse_intent) {
                dispatch(intent);
            }
        }) as Box<dyn FnMut(_)>);
        root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Number keys pick options, matching the "1. 猫" button labels
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if let Some(n) = evt.key().parse::<usize>().ok().filter(|n| (1..=4).contains(n)) {
                dispatch(Intent::SelectOption(n - 1));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn with_game(f: impl FnOnce(&mut WebGame) -> Result<(), JsValue>) {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            if let Err(e) = f(game) {
                log::error!("render failed: {e:?}");
            }
        }
    });
}

fn dispatch(intent: Intent) {
    with_game(|game| {
        let had_feedback = game.nav.feedback().is_some();
        game.nav.dispatch(intent);
        let frame = game.nav.frame();
        render(&game.doc, &game.root, &frame)?;
        if let (false, Some(fb)) = (had_feedback, frame.feedback) {
            let (next, delay) = if fb.correct {
                (Intent::Advance, game.config.advance_delay_ms)
            } else {
                (Intent::ShowResult, game.config.fall_delay_ms)
            };
            schedule(next, game.nav.feedback_token(), delay)?;
        }
        Ok(())
    });
}

/// Fire `intent` after `delay_ms` unless the feedback behind `token` has been
/// superseded by then.
fn schedule(intent: Intent, token: u64, delay_ms: i32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = Closure::once_into_js(move || {
        with_game(|game| {
            game.nav.dispatch_if_current(intent, token);
            render(&game.doc, &game.root, &game.nav.frame())
        })
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)?;
    Ok(())
}

/// Decode a `data-intent` attribute.
fn parse_intent(raw: &str) -> Option<Intent> {
    let intent = match raw.split_once(':') {
        Some(("unit", id)) => Intent::SelectUnit(id.parse().ok()?),
        Some(("difficulty", d)) => Intent::SelectDifficulty(Difficulty::parse(d)?),
        Some(("option", i)) => Intent::SelectOption(i.parse().ok()?),
        Some(_) => return None,
        None => match raw {
            "level" => Intent::ChooseLevelMode,
            "endless" => Intent::ChooseEndlessMode,
            "quit" => Intent::Quit,
            "again" => Intent::PlayAgain,
            "back-start" => Intent::BackToStart,
            "back-units" => Intent::BackToUnits,
            _ => return None,
        },
    };
    Some(intent)
}

// --- Rendering ---------------------------------------------------------------

fn el(doc: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let e = doc.create_element(tag)?;
    if !class.is_empty() {
        e.set_class_name(class);
    }
    if text.is_some() {
        e.set_text_content(text);
    }
    Ok(e)
}

fn button(doc: &Document, label: &str, intent: &str) -> Result<Element, JsValue> {
    let b = el(doc, "button", "", Some(label))?;
    b.set_attribute("data-intent", intent)?;
    Ok(b)
}

fn render(doc: &Document, root: &Element, frame: &Frame) -> Result<(), JsValue> {
    root.set_inner_html("");
    let screen = el(doc, "div", "screen active", None)?;
    screen.set_id(&format!("{}-screen", frame.screen.id()));
    match frame.screen {
        Screen::Start => render_start(doc, &screen)?,
        Screen::UnitSelect => render_units(doc, &screen, frame)?,
        Screen::DifficultySelect => render_difficulties(doc, &screen, frame)?,
        Screen::Game => render_game(doc, &screen, frame)?,
        Screen::End => {
            if let Some(outcome) = frame.outcome {
                render_end(doc, &screen, outcome)?;
            }
        }
    }
    root.append_child(&screen)?;
    Ok(())
}

fn render_start(doc: &Document, screen: &Element) -> Result<(), JsValue> {
    screen.append_child(&*el(doc, "h1", "", Some("🐸 青蛙过河"))?)?;
    screen.append_child(&*el(doc, "p", "", Some("选对单词的意思，帮助青蛙跳过小河！"))?)?;
    screen.append_child(&*button(doc, "闯关模式", "level")?)?;
    screen.append_child(&*button(doc, "无尽模式", "endless")?)?;
    Ok(())
}

fn render_units(doc: &Document, screen: &Element, frame: &Frame) -> Result<(), JsValue> {
    screen.append_child(&*el(doc, "h2", "", Some("选择单元"))?)?;
    let grid = el(doc, "div", "units-grid", None)?;
    for u in &frame.units {
        let b = button(doc, "", &format!("unit:{}", u.unit))?;
        b.set_class_name("unit-btn");
        b.set_text_content(None);
        b.append_child(&*el(doc, "div", "unit-number", Some(&format!("第 {} 单元", u.unit)))?)?;
        b.append_child(&*el(doc, "div", "word-count", Some(&format!("{} 个单词", u.word_count)))?)?;
        grid.append_child(&b)?;
    }
    screen.append_child(&grid)?;
    screen.append_child(&*button(doc, "返回", "back-start")?)?;
    Ok(())
}

fn render_difficulties(doc: &Document, screen: &Element, frame: &Frame) -> Result<(), JsValue> {
    let unit = frame.selected_unit.unwrap_or_default();
    screen.append_child(&*el(doc, "h2", "", Some(&format!("第 {unit} 单元")))?)?;
    let word_count = frame.units.iter().find(|u| u.unit == unit).map_or(0, |u| u.word_count);
    for (d, key) in [(Difficulty::Easy, "easy"), (Difficulty::Medium, "medium"), (Difficulty::Hard, "hard")] {
        let steps = match d.total_steps(word_count) {
            crate::StepTarget::Bounded(n) => n,
            crate::StepTarget::Unbounded => 0,
        };
        let label = format!("{} · {} 步", d.label(), steps);
        let card = button(doc, &label, &format!("difficulty:{key}"))?;
        card.set_class_name("difficulty-card");
        screen.append_child(&card)?;
    }
    screen.append_child(&*button(doc, "返回", "back-units")?)?;
    Ok(())
}

fn render_game(doc: &Document, screen: &Element, frame: &Frame) -> Result<(), JsValue> {
    let header = el(doc, "div", "game-header", None)?;
    if frame.difficulty != Some(Difficulty::Endless) {
        if let Some(unit) = frame.selected_unit {
            header.append_child(&*el(doc, "span", "", Some(&format!("单元 {unit} · ")))?)?;
        }
    }
    if let Some(d) = frame.difficulty {
        header.append_child(&*el(doc, "span", "", Some(&format!("{} · ", d.label())))?)?;
    }
    if let Some(p) = frame.progress {
        header.append_child(&*el(doc, "span", "", Some(&format!("进度 {} · 得分 {}", p.display(), p.score)))?)?;
    }
    header.append_child(&*button(doc, "退出", "quit")?)?;
    screen.append_child(&header)?;

    let Some(round) = &frame.round else {
        return Ok(());
    };
    let river = el(doc, "div", "river", None)?;
    let pads = el(doc, "div", "lily-pads", None)?;
    for (i, text) in round.options.iter().enumerate() {
        let pad = el(doc, "div", "lily-pad", Some(text))?;
        pad.set_attribute("data-intent", &format!("option:{i}"))?;
        if let Some(fb) = frame.feedback {
            let style = match (fb.correct, fb.option_index == i) {
                (true, true) => format!("background:{GREEN_PAD}; transform:scale(1.15);"),
                (false, true) => format!("background:{RED_PAD}; transform:scale(1.15);"),
                (false, false) => format!("background:{RED_PAD}; transform:scale(0.9);"),
                (true, false) => String::new(),
            };
            pad.set_attribute("style", &style)?;
        }
        pads.append_child(&pad)?;
    }
    river.append_child(&pads)?;

    let current = el(doc, "div", "current-pad", None)?;
    let frog_class = match frame.feedback {
        Some(fb) if fb.correct => "frog jump",
        Some(_) => "frog fall",
        None => "frog",
    };
    current.append_child(&*el(doc, "div", frog_class, Some("🐸"))?)?;
    current.append_child(&*el(doc, "div", "english-word", Some(&round.english))?)?;
    river.append_child(&current)?;
    screen.append_child(&river)?;

    let buttons = el(doc, "div", "option-buttons", None)?;
    for (i, text) in round.options.iter().enumerate() {
        let b = button(doc, &format!("{}. {}", i + 1, text), &format!("option:{i}"))?;
        b.set_class_name("option-btn");
        buttons.append_child(&b)?;
    }
    screen.append_child(&buttons)?;
    Ok(())
}

fn render_end(doc: &Document, screen: &Element, outcome: SessionOutcome) -> Result<(), JsValue> {
    let icon = if outcome.won { "🏆" } else { "💦" };
    screen.append_child(&*el(doc, "div", "result-icon", Some(icon))?)?;
    screen.append_child(&*el(doc, "h2", "result-title", Some(outcome.title()))?)?;
    screen.append_child(&*el(doc, "p", "result-message", Some(outcome.message()))?)?;
    let stats = format!(
        "得分 {} · 答对 {} 个单词 · {}",
        outcome.score,
        outcome.correct_count,
        outcome.pass_status()
    );
    screen.append_child(&*el(doc, "p", "result-stats", Some(&stats))?)?;
    screen.append_child(&*button(doc, "再玩一次", "again")?)?;
    screen.append_child(&*button(doc, "返回首页", "back-start")?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_intents() {
        assert_eq!(parse_intent("unit:3"), Some(Intent::SelectUnit(3)));
        assert_eq!(parse_intent("difficulty:hard"), Some(Intent::SelectDifficulty(Difficulty::Hard)));
        assert_eq!(parse_intent("option:2"), Some(Intent::SelectOption(2)));
        assert_eq!(parse_intent("back-units"), Some(Intent::BackToUnits));
    }

    #[test]
    fn rejects_unknown_intents() {
        for raw in ["", "unit:x", "difficulty:endless", "fly", "option:-1"] {
            assert_eq!(parse_intent(raw), None, "{raw}");
        }
    }
}
