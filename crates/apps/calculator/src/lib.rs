//! Calculator window contents: an expression display over a keypad.

mod engine;

use desktop_app_contract::{window_primary_input_dom_id, AppModule, PaintRegion};
use leptos::ev::KeyboardEvent;
use leptos::*;

pub use engine::{evaluate, format_result, CalcError, CalcKey, CalculatorState, ERROR_TEXT};

/// Renderable registered by the desktop runtime for calculator windows.
pub const CALCULATOR_MODULE: AppModule = AppModule::new(paint_calculator);

fn paint_calculator(region: PaintRegion) -> View {
    view! { <CalculatorApp region=region /> }.into_view()
}

#[derive(Clone, Copy)]
struct CalcKeySpec {
    label: &'static str,
    class_name: &'static str,
    key: CalcKey,
}

const fn digit(label: &'static str, ch: char) -> CalcKeySpec {
    CalcKeySpec {
        label,
        class_name: "calc-key-number",
        key: CalcKey::Input(ch),
    }
}

const fn operator(label: &'static str, ch: char) -> CalcKeySpec {
    CalcKeySpec {
        label,
        class_name: "calc-key-operator",
        key: CalcKey::Input(ch),
    }
}

const CALC_KEYS: [CalcKeySpec; 19] = [
    CalcKeySpec {
        label: "AC",
        class_name: "calc-key-clear",
        key: CalcKey::ClearAll,
    },
    CalcKeySpec {
        label: "⌫",
        class_name: "calc-key-operator",
        key: CalcKey::Backspace,
    },
    operator("^", '^'),
    operator("÷", '÷'),
    digit("7", '7'),
    digit("8", '8'),
    digit("9", '9'),
    operator("×", '×'),
    digit("4", '4'),
    digit("5", '5'),
    digit("6", '6'),
    operator("-", '-'),
    digit("1", '1'),
    digit("2", '2'),
    digit("3", '3'),
    operator("+", '+'),
    digit("0", '0'),
    digit(".", '.'),
    CalcKeySpec {
        label: "=",
        class_name: "calc-key-equals",
        key: CalcKey::Evaluate,
    },
];

fn keyboard_key(key: &str) -> Option<CalcKey> {
    match key {
        "Enter" | "=" => Some(CalcKey::Evaluate),
        "Backspace" => Some(CalcKey::Backspace),
        "Escape" => Some(CalcKey::ClearAll),
        "*" | "x" => Some(CalcKey::Input('×')),
        "/" => Some(CalcKey::Input('÷')),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_digit() || "+-^.()".contains(ch) => {
                    Some(CalcKey::Input(ch))
                }
                _ => None,
            }
        }
    }
}

/// Calculator window contents.
#[component]
pub fn CalculatorApp(region: PaintRegion) -> impl IntoView {
    let calc = create_rw_signal(CalculatorState::default());
    let focused = region.focused;

    let on_keydown = move |ev: KeyboardEvent| {
        if !focused.get_untracked() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        if let Some(key) = keyboard_key(&ev.key()) {
            ev.prevent_default();
            calc.update(|state| state.apply(key));
        }
    };

    view! {
        <div
            id=window_primary_input_dom_id(&region.window_id)
            class="app-shell app-calculator-shell"
            tabindex="0"
            on:keydown=on_keydown
        >
            <div class="calc-display-panel" class:is-error=move || calc.with(CalculatorState::is_error)>
                <span class="calc-history">{move || calc.with(|state| state.history.clone())}</span>
                <span class="calc-display" role="status" aria-live="polite">
                    {move || calc.with(|state| state.shown().to_string())}
                </span>
            </div>
            <div class="calc-keypad" role="group" aria-label="Calculator keys">
                {CALC_KEYS
                    .into_iter()
                    .map(|spec| {
                        view! {
                            <button
                                type="button"
                                class=format!("calc-key {}", spec.class_name)
                                on:click=move |_| calc.update(|state| state.apply(spec.key))
                            >
                                {spec.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keyboard_maps_ascii_operators_to_keypad_symbols() {
        assert_eq!(keyboard_key("7"), Some(CalcKey::Input('7')));
        assert_eq!(keyboard_key("*"), Some(CalcKey::Input('×')));
        assert_eq!(keyboard_key("/"), Some(CalcKey::Input('÷')));
        assert_eq!(keyboard_key("Enter"), Some(CalcKey::Evaluate));
        assert_eq!(keyboard_key("Escape"), Some(CalcKey::ClearAll));
        assert_eq!(keyboard_key("a"), None);
        assert_eq!(keyboard_key("Shift"), None);
    }

    #[test]
    fn keypad_covers_every_operator_once() {
        let operators: Vec<_> = CALC_KEYS
            .iter()
            .filter(|spec| spec.class_name == "calc-key-operator")
            .map(|spec| spec.label)
            .collect();
        assert_eq!(operators, vec!["⌫", "^", "÷", "×", "-", "+"]);
    }
}
