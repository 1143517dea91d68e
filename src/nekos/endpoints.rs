// Image categories and endpoint resolution.
// Maps a category tag to the URL of the API that serves it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NekoError;

pub const NEKOS_BEST_BASE: &str = "https://nekos.best/api/v2";
pub const NEKO_RANDOM_URL: &str = "https://api.nekosapi.com/v2/images/random";

/// Declares the closed category set with its wire tags.
macro_rules! categories {
    ( $( $variant:ident => $tag:literal ),+ $(,)? ) => {
        /// Image theme requested from the image APIs.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Category {
            $( $variant, )+
        }

        impl Category {
            /// Every known category, in the order the APIs list them.
            pub const ALL: &'static [Category] = &[ $( Category::$variant, )+ ];

            /// The tag used in URLs and on the command line.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Category::$variant => $tag, )+
                }
            }
        }
    };
}

// Tags are kept verbatim, including "state" and "faceplam".
categories! {
    Highfive => "highfive",
    Happy => "happy",
    Sleep => "sleep",
    Handhold => "handhold",
    Laugh => "laugh",
    Bite => "bite",
    Poke => "poke",
    Tickle => "tickle",
    Kiss => "kiss",
    Wave => "wave",
    Thumbsup => "thumbsup",
    State => "state",
    Cuddle => "cuddle",
    Baka => "baka",
    Blush => "blush",
    Nom => "nom",
    Think => "think",
    Pout => "pout",
    Faceplam => "faceplam",
    Wink => "wink",
    Shoot => "shoot",
    Smug => "smug",
    Nope => "nope",
    Cry => "cry",
    Pat => "pat",
    Nod => "nod",
    Punch => "punch",
    Dance => "dance",
    Feed => "feed",
    Shrug => "shrug",
    Bored => "bored",
    Kick => "kick",
    Hug => "hug",
    Yeet => "yeet",
    Slap => "slap",
    Neko => "neko",
    Husbando => "husbando",
    Kitsune => "kitsune",
    Waifu => "waifu",
    Random => "random",
}

impl Category {
    /// Whether this category is served by the random image API.
    pub fn is_random(&self) -> bool {
        *self == Category::Random
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = NekoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| NekoError::UnknownCategory(s.to_string()))
    }
}

/// Base URLs of the two image APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sources {
    /// Categorized API, queried as `<nekos_best>/<category>`.
    #[serde(default = "default_nekos_best")]
    pub nekos_best: String,
    /// Random image API, queried verbatim.
    #[serde(default = "default_neko_random")]
    pub neko_random: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            nekos_best: default_nekos_best(),
            neko_random: default_neko_random(),
        }
    }
}

impl Sources {
    /// Resolve the metadata URL for a category.
    pub fn endpoint(&self, category: Category) -> String {
        if category.is_random() {
            return self.neko_random.clone();
        }

        format!("{}/{}", self.nekos_best, category)
    }
}

fn default_nekos_best() -> String {
    NEKOS_BEST_BASE.to_string()
}

fn default_neko_random() -> String {
    NEKO_RANDOM_URL.to_string()
}
