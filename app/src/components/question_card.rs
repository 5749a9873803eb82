use dioxus::prelude::*;
use quizstake_engine::Question;

#[derive(Props, Clone, PartialEq)]
pub struct QuestionCardProps {
    pub question: Question,
    /// Currently selected option index
    #[props(default)]
    pub selected: Option<usize>,
    /// Verdict for the submitted answer, once the evaluator replied
    #[props(default)]
    pub feedback: Option<bool>,
    /// Whether options can be clicked
    #[props(default = false)]
    pub disabled: bool,
    pub on_select: EventHandler<usize>,
}

#[component]
pub fn QuestionCard(props: QuestionCardProps) -> Element {
    let selected = props.selected;
    let feedback = props.feedback;
    let disabled = props.disabled;
    let on_select = props.on_select;

    rsx! {
        div {
            p { class: "text-lg text-high mb-6", "{props.question.text}" }

            div { class: "grid grid-cols-1 gap-3",
                for (i, option) in props.question.options.iter().enumerate() {
                    {
                        let is_selected = selected == Some(i);
                        let option = option.clone();
                        let class = match (feedback, is_selected) {
                            (Some(true), true) => "border-green-500/60 bg-green-500/10 text-green-400",
                            (Some(false), true) => "border-red-500/60 bg-red-500/10 text-red-400",
                            (_, true) => "border-gold bg-gold/10 text-high",
                            _ => "elevated-border text-mid hover:text-high",
                        };
                        rsx! {
                            button {
                                class: "elevated border rounded-lg px-4 py-3 text-left transition-colors {class}",
                                disabled: disabled,
                                onclick: move |_| {
                                    if !disabled {
                                        on_select.call(i);
                                    }
                                },
                                "{option}"
                            }
                        }
                    }
                }
            }
        }
    }
}
