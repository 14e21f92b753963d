//! Bundled book collections the default catalog is generated from.

use serde::{Deserialize, Serialize};

/// Only this many poems per book make it into a generated catalog.
pub const DEFAULT_POEMS_PER_BOOK: usize = 15;

/// One harvested book: its metadata and poem titles in book order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCollection {
    pub file: String,
    pub author: String,
    pub book_title: String,
    pub year: String,
    pub poems: Vec<String>,
}

impl BookCollection {
    fn new(file: &str, author: &str, book_title: &str, year: &str, poems: &[&str]) -> Self {
        Self {
            file: file.to_string(),
            author: author.to_string(),
            book_title: book_title.to_string(),
            year: year.to_string(),
            poems: poems.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub fn bundled_collections() -> Vec<BookCollection> {
    vec![
        BookCollection::new(
            "2006081600051.xml",
            "Mortensson-Egnund, Ivar",
            "Or duldo: draumkvæe",
            "1895",
            &[
                "Maaneljos",
                "Uro",
                "Kven æ du?",
                "Dæ ropar eit maal",
                "Vaar",
                "Baanehender",
                "Ei go tiend",
                "Mannaord",
                "Livsens leik",
                "Høgt leite",
                "Uten titel",
                "Utferd",
                "Mannavyrdna",
                "Tirande glør",
                "Fivreld",
                "Ein liten ting",
                "Liv aa sæle",
                "Vitjing",
                "Got aa fagert",
                "Glitretindar",
                "Eg tenkte",
                "Fela",
                "Husk",
                "Kattejerd",
                "Eld aa vatn",
            ],
        ),
        BookCollection::new(
            "2006082400076.xml",
            "Randers, Kristofer",
            "En Kjærlighedsvaar : Digt-Cyklus",
            "1894",
            &[
                "Forord",
                "Tilegnelse til 1ste Udgave",
                "Tilegnelse til 2den Udgave",
                "Til Kjærligheden",
                "1",
                "2",
                "3",
                "4",
                "5",
                "6",
                "7",
                "Aftenhvisken",
                "Tonerne",
                "I krydsilden",
                "Rosen og Tistlen",
                "Bellas Hjerte",
                "Visitten i Helvede",
                "Amors Besøg",
                "Alvorsord",
                "Tømmermænd",
                "Drømmen",
                "Pandora",
                "Stille Lykke",
                "Kjærlighedssang",
                "Min Skat",
                "Digtersorg",
            ],
        ),
    ]
}
