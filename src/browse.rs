use anyhow::Result;
use inquire::{InquireError, Select};
use std::fmt;
use swapi_roster::core::model::EnrichedCharacter;
use swapi_roster::core::table::{detail_fields, favorite_marker};
use swapi_roster::{Roster, Selection};

enum Row {
    Character { name: String, label: String },
    Quit,
}

impl Row {
    fn new(c: &EnrichedCharacter) -> Self {
        Row::Character {
            name: c.name().to_string(),
            label: format!(
                "{} {:<24} {:>6} cm  {}",
                favorite_marker(c.favorite),
                c.name(),
                c.character.height,
                c.homeworld_name
            ),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Character { label, .. } => write!(f, "{}", label),
            Row::Quit => write!(f, "Quit"),
        }
    }
}

enum Action {
    Details,
    ToggleFavorite,
    Close,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Details => write!(f, "Show details"),
            Action::ToggleFavorite => write!(f, "Toggle favorite"),
            Action::Close => write!(f, "Close"),
        }
    }
}

/// `None` when the user cancelled with Esc or Ctrl-C.
fn prompt<T: fmt::Display>(message: &str, options: Vec<T>, page_size: usize) -> Result<Option<T>> {
    match Select::new(message, options).with_page_size(page_size).prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn run(roster: &Roster, page_size: usize) -> Result<()> {
    let page_size = page_size.max(1);

    loop {
        let mut rows: Vec<Row> = roster.characters().await.iter().map(Row::new).collect();
        rows.push(Row::Quit);

        let name = match prompt("Know your favorite Star Wars characters", rows, page_size)? {
            Some(Row::Character { name, .. }) => name,
            Some(Row::Quit) | None => return Ok(()),
        };

        let actions = vec![Action::Details, Action::ToggleFavorite, Action::Close];
        match prompt(&format!("{}:", name), actions, page_size)? {
            Some(Action::Details) => show_details(roster, &name, page_size).await?,
            Some(Action::ToggleFavorite) => toggle(roster, &name).await,
            Some(Action::Close) | None => {}
        }
    }
}

async fn toggle(roster: &Roster, name: &str) {
    match roster.toggle_favorite(name).await {
        Ok(true) => println!("{} {} added to favorites", favorite_marker(true), name),
        Ok(false) => println!("{} {} removed from favorites", favorite_marker(false), name),
        Err(e) => eprintln!("Could not update favorites: {}", e),
    }
}

async fn show_details(roster: &Roster, name: &str, page_size: usize) -> Result<()> {
    let Some(selection) = roster.select(name).await? else {
        return Ok(());
    };
    print_details(&selection);

    loop {
        let actions = vec![Action::ToggleFavorite, Action::Close];
        match prompt("Character Details", actions, page_size)? {
            Some(Action::ToggleFavorite) => toggle(roster, name).await,
            _ => break,
        }
    }

    roster.close_selection().await;
    Ok(())
}

fn print_details(selection: &Selection) {
    println!();
    println!("Character Details");
    for (label, value) in detail_fields(&selection.character) {
        println!("  {:<11} {}", format!("{}:", label), value);
    }
    if let Some(image) = &selection.character.image {
        println!("  {:<11} {}", "Portrait:", image);
    }

    println!();
    println!("Movies");
    if selection.film_titles.is_empty() {
        println!("  (none)");
    }
    for title in &selection.film_titles {
        println!("  - {}", title);
    }
    println!();
}
