use dioxus::prelude::*;
use shared_types::AddressSuggestion;
use shared_ui::Input;

/// Minimum query length before a lookup fires.
const MIN_QUERY_LEN: usize = 3;

/// Text input with address suggestions from the geocoding lookup.
///
/// Lookups are best-effort: failures leave the dropdown empty instead of
/// surfacing an error. Responses arriving after further typing are
/// discarded — only the newest query's results show.
#[component]
pub fn AddressAutocomplete(
    #[props(default)] label: String,
    value: Signal<String>,
    on_select: EventHandler<AddressSuggestion>,
) -> Element {
    let mut suggestions = use_signal(Vec::<AddressSuggestion>::new);
    let mut show_suggestions = use_signal(|| false);
    let mut generation = use_signal(|| 0u32);

    let handle_input = move |evt: FormEvent| {
        let query = evt.value();
        value.clone().set(query.clone());
        show_suggestions.set(true);

        let gen = generation() + 1;
        generation.set(gen);

        if query.trim().len() < MIN_QUERY_LEN {
            suggestions.set(Vec::new());
            return;
        }

        spawn(async move {
            let results = server::api::search_addresses(query)
                .await
                .unwrap_or_default();
            // A newer keystroke owns the dropdown now
            if generation() == gen {
                suggestions.set(results);
            }
        });
    };

    rsx! {
        div { class: "address-autocomplete",
            Input {
                label: label,
                value: value(),
                placeholder: "Search for an address...",
                on_input: handle_input,
            }
            if show_suggestions() && !suggestions().is_empty() {
                ul { class: "address-suggestions",
                    for suggestion in suggestions() {
                        li {
                            class: "address-suggestion",
                            onclick: {
                                let suggestion = suggestion.clone();
                                move |_| {
                                    value.clone().set(suggestion.display_name.clone());
                                    on_select.call(suggestion.clone());
                                    show_suggestions.set(false);
                                    suggestions.set(Vec::new());
                                }
                            },
                            "{suggestion.display_name}"
                        }
                    }
                }
            }
        }
    }
}
