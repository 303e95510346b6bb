//! Table layout shared by the terminal and browser front ends.

use crate::core::model::EnrichedCharacter;

/// Screen width classes, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub fn from_width(px: u32) -> Self {
        match px {
            0..=575 => Breakpoint::Xs,
            576..=767 => Breakpoint::Sm,
            768..=991 => Breakpoint::Md,
            992..=1199 => Breakpoint::Lg,
            _ => Breakpoint::Xl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Height,
    Homeworld,
    BirthYear,
    Favorite,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Height,
        Column::Homeworld,
        Column::BirthYear,
        Column::Favorite,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Height => "Height",
            Column::Homeworld => "Homeworld",
            Column::BirthYear => "Birth Year",
            Column::Favorite => "Favorite",
        }
    }

    /// Narrowest breakpoint at which the column is shown.
    pub fn min_breakpoint(self) -> Breakpoint {
        match self {
            Column::Name | Column::Favorite => Breakpoint::Xs,
            Column::Height => Breakpoint::Sm,
            Column::Homeworld => Breakpoint::Md,
            Column::BirthYear => Breakpoint::Lg,
        }
    }

    pub fn visible_at(self, bp: Breakpoint) -> bool {
        bp >= self.min_breakpoint()
    }

    pub fn cell(self, record: &EnrichedCharacter) -> String {
        match self {
            Column::Name => record.character.name.clone(),
            Column::Height => record.character.height.clone(),
            Column::Homeworld => record.homeworld_name.clone(),
            Column::BirthYear => record.character.birth_year.clone(),
            Column::Favorite => favorite_marker(record.favorite).to_string(),
        }
    }
}

pub fn favorite_marker(favorite: bool) -> &'static str {
    if favorite {
        "★"
    } else {
        "☆"
    }
}

pub fn visible_columns(bp: Breakpoint) -> Vec<Column> {
    Column::ALL.into_iter().filter(|c| c.visible_at(bp)).collect()
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Rows on zero-based `page`. Out of range pages are empty.
pub fn page_slice<T>(records: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size);
    if page_size == 0 || start >= records.len() {
        return &[];
    }
    let end = (start + page_size).min(records.len());
    &records[start..end]
}

/// Label/value rows of the detail panel.
pub fn detail_fields(record: &EnrichedCharacter) -> Vec<(&'static str, String)> {
    let c = &record.character;
    vec![
        ("Name", c.name.clone()),
        ("Height", format!("{} cm", c.height)),
        ("Homeworld", record.homeworld_name.clone()),
        ("Birth Year", c.birth_year.clone()),
        ("Eye Color", c.eye_color.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Character;

    fn luke() -> EnrichedCharacter {
        EnrichedCharacter {
            character: Character {
                name: "Luke Skywalker".to_string(),
                height: "172".to_string(),
                birth_year: "19BBY".to_string(),
                eye_color: "blue".to_string(),
                homeworld: "https://swapi.dev/api/planets/1/".to_string(),
                films: vec![],
                url: "https://swapi.dev/api/people/1/".to_string(),
            },
            homeworld_name: "Tatooine".to_string(),
            image: None,
            favorite: true,
        }
    }

    #[test]
    fn test_breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(320), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(576), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(800), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(1000), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(1920), Breakpoint::Xl);
    }

    #[test]
    fn test_columns_appear_as_the_screen_widens() {
        assert_eq!(visible_columns(Breakpoint::Xs), vec![Column::Name, Column::Favorite]);
        assert_eq!(
            visible_columns(Breakpoint::Md),
            vec![Column::Name, Column::Height, Column::Homeworld, Column::Favorite]
        );
        assert_eq!(visible_columns(Breakpoint::Xl).len(), 5);
        assert!(!Column::BirthYear.visible_at(Breakpoint::Md));
        assert!(Column::BirthYear.visible_at(Breakpoint::Lg));
    }

    #[test]
    fn test_cells() {
        let record = luke();
        assert_eq!(Column::Homeworld.cell(&record), "Tatooine");
        assert_eq!(Column::Favorite.cell(&record), "★");
    }

    #[test]
    fn test_pagination() {
        let rows: Vec<u32> = (0..12).collect();
        assert_eq!(page_count(rows.len(), 5), 3);
        assert_eq!(page_slice(&rows, 0, 5), &[0, 1, 2, 3, 4]);
        assert_eq!(page_slice(&rows, 2, 5), &[10, 11]);
        assert!(page_slice(&rows, 3, 5).is_empty());
        assert_eq!(page_count(0, 5), 0);
    }

    #[test]
    fn test_detail_fields() {
        let fields = detail_fields(&luke());
        assert_eq!(fields[1], ("Height", "172 cm".to_string()));
        assert_eq!(fields[4], ("Eye Color", "blue".to_string()));
    }
}
