use crate::core::config::Config;
use crate::core::model::EnrichedCharacter;
use crate::core::table::{detail_fields, page_count, page_slice, visible_columns, Breakpoint, Column};
use crate::services::roster::{LoadStatus, Roster, Selection};
use leptos::*;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    let config = Config::default();

    match Roster::web(&config) {
        Ok(roster) => view! { <Homepage roster=Rc::new(roster) page_size=config.page_size/> }.into_view(),
        Err(e) => view! { <p>"Error opening storage: " {e.to_string()}</p> }.into_view(),
    }
}

#[component]
pub fn Homepage(roster: Rc<Roster>, page_size: usize) -> impl IntoView {
    let (status, set_status) = create_signal(LoadStatus::Loading);
    let (characters, set_characters) = create_signal(Vec::<EnrichedCharacter>::new());
    let (selection, set_selection) = create_signal(None::<Selection>);
    let (page, set_page) = create_signal(0usize);
    let (breakpoint, set_breakpoint) = create_signal(current_breakpoint());

    let _resize = window_event_listener(ev::resize, move |_| set_breakpoint.set(current_breakpoint()));
    let columns = move || visible_columns(breakpoint.get());

    let roster_for_load = roster.clone();
    create_effect(move |_| {
        let roster = roster_for_load.clone();
        spawn_local(async move {
            if let Err(e) = roster.load_enriched_characters().await {
                leptos::logging::error!("Error fetching data: {}", e);
            }
            let state = roster.snapshot().await;
            set_characters.set(state.characters);
            set_status.set(state.status);
        });
    });

    let roster_for_toggle = roster.clone();
    let on_toggle = Callback::new(move |name: String| {
        let roster = roster_for_toggle.clone();
        spawn_local(async move {
            if let Err(e) = roster.toggle_favorite(&name).await {
                leptos::logging::error!("Failed to save favorites: {}", e);
            }
            set_characters.set(roster.characters().await);
            set_selection.set(roster.selection().await);
        });
    });

    let roster_for_select = roster.clone();
    let on_select = Callback::new(move |name: String| {
        let roster = roster_for_select.clone();
        let clicked = characters.with_untracked(|all| all.iter().find(|c| c.name() == name).cloned());
        if let Some(character) = clicked {
            set_selection.set(Some(Selection {
                character,
                film_titles: Vec::new(),
            }));
        }
        spawn_local(async move {
            match roster.select(&name).await {
                Ok(Some(current)) => set_selection.set(Some(current)),
                Ok(None) => {}
                Err(e) => leptos::logging::error!("Failed to select {}: {}", name, e),
            }
        });
    });

    let on_close = Callback::new(move |_: ()| {
        let roster = roster.clone();
        spawn_local(async move {
            roster.close_selection().await;
            set_selection.set(None);
        });
    });

    let pages = move || characters.with(|c| page_count(c.len(), page_size));

    let rows = move || {
        let all = characters.get();
        page_slice(&all, page.get(), page_size)
            .iter()
            .cloned()
            .map(|record| {
                view! { <CharacterRow record=record columns=columns() on_select=on_select on_toggle=on_toggle/> }
            })
            .collect_view()
    };

    let table = move || match status.get() {
        LoadStatus::Loading => view! {
            <div class="flex justify-center">
                <div class="spinner">"Loading..."</div>
            </div>
        }
        .into_view(),
        LoadStatus::Failed(_) => view! {
            <div class="flex justify-center">"Could not load characters."</div>
        }
        .into_view(),
        LoadStatus::Ready => view! {
            <div class="mt-20">
                <table class="w-full">
                    <thead>
                        <tr>
                            {move || {
                                columns()
                                    .into_iter()
                                    .map(|col| view! { <th>{col.header()}</th> })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                <div class="flex justify-end gap-2 mt-2">
                    <button
                        disabled=move || page.get() == 0
                        on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1))
                    >
                        "<"
                    </button>
                    <span>{move || format!("{} / {}", page.get() + 1, pages().max(1))}</span>
                    <button
                        disabled=move || page.get() + 1 >= pages()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        ">"
                    </button>
                </div>
            </div>
        }
        .into_view(),
    };

    view! {
        <div class="container w-full mx-auto md:py-6 flex flex-col md:flex-row">
            <div class="flex-grow">
                <div class="flex md:text-4xl justify-center text-2xl text-center mb-4">
                    "Know your favorite Star Wars characters"
                </div>
                {table}
            </div>
            {move || selection.get().map(|current| view! { <CharacterDetails selection=current on_close=on_close/> })}
        </div>
    }
}

#[component]
fn CharacterRow(
    record: EnrichedCharacter,
    columns: Vec<Column>,
    on_select: Callback<String>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    let name = record.name().to_string();
    let row_name = name.clone();

    let cells = columns
        .into_iter()
        .map(|col| {
            let text = col.cell(&record);
            if col == Column::Favorite {
                let name = name.clone();
                view! {
                    <td
                        class="cursor-pointer"
                        on:click=move |ev: ev::MouseEvent| {
                            ev.stop_propagation();
                            on_toggle.call(name.clone());
                        }
                    >
                        {text}
                    </td>
                }
            } else {
                view! { <td>{text}</td> }
            }
        })
        .collect_view();

    view! {
        <tr class="cursor-pointer" on:click=move |_| on_select.call(row_name.clone())>
            {cells}
        </tr>
    }
}

#[component]
fn CharacterDetails(selection: Selection, on_close: Callback<()>) -> impl IntoView {
    let fields = detail_fields(&selection.character)
        .into_iter()
        .map(|(label, value)| {
            view! {
                <p class="text-md mb-2">
                    <strong>{label} ":"</strong>
                    " "
                    {value}
                </p>
            }
        })
        .collect_view();

    let portrait = selection
        .character
        .image
        .clone()
        .map(|src| view! { <img class="w-32 mb-4" src=src alt=selection.character.name().to_string()/> });

    let movies = selection
        .film_titles
        .into_iter()
        .map(|title| view! { <li>{title}</li> })
        .collect_view();

    view! {
        <div class="w-full md:w-1/3 p-4 border-t md:border-t-0 md:border-l">
            <div class="character-deets relative border rounded-lg p-5 shadow-lg bg-white">
                <button class="absolute top-2 right-2" on:click=move |_| on_close.call(())>
                    "×"
                </button>
                <h2 class="text-lg mb-4">"Character Details"</h2>
                {portrait}
                {fields}
                <h3 class="text-md mt-4 mb-2">"Movies"</h3>
                <ul>{movies}</ul>
            </div>
        </div>
    }
}

fn current_breakpoint() -> Breakpoint {
    let width = window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(1200.0);
    Breakpoint::from_width(width as u32)
}
