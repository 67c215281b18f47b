//! Minimal game library backing the games screen: installed flags, a
//! filter/sort/search pipeline, and the quick-resume ring.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Most recently suspended titles kept for quick resume.
pub const QUICK_RESUME_MAX: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub installed: bool,
    /// Ordering key for the "recent" sort; bigger is more recent.
    pub last_played: u32,
}

impl Game {
    fn new(id: &str, title: &str, genre: &str, installed: bool, last_played: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genre: genre.into(),
            installed,
            last_played,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    All,
    Installed,
}

impl Filter {
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Installed,
            Filter::Installed => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Installed => "Installed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    Recent,
    Alphabetical,
}

impl Sort {
    pub fn next(self) -> Sort {
        match self {
            Sort::Recent => Sort::Alphabetical,
            Sort::Alphabetical => Sort::Recent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sort::Recent => "Recent",
            Sort::Alphabetical => "A-Z",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Library {
    games: Vec<Game>,
    pub filter: Filter,
    pub sort: Sort,
    /// Live search text; only applied to the visible set on "Apply".
    pub search: String,
    applied_search: String,
    quick_resume: Vec<String>,
}

impl Library {
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games,
            filter: Filter::All,
            sort: Sort::Recent,
            search: String::new(),
            applied_search: String::new(),
            quick_resume: Vec::new(),
        }
    }

    /// The stock catalog the shell boots with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Game::new("eldenring", "Elden Ring", "Action RPG", true, 100),
            Game::new("cyberpunk", "Cyberpunk 2077", "RPG", true, 90),
            Game::new("horizon", "Horizon Forbidden West", "Adventure", true, 80),
            Game::new("tlou2", "The Last of Us Part II", "Survival", false, 70),
            Game::new("gtavi", "Grand Theft Auto VI", "Open World", false, 60),
            Game::new("minecraft", "Minecraft", "Sandbox", true, 50),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Filter, applied search and sort, in that order.
    pub fn visible(&self) -> Vec<&Game> {
        let needle = self.applied_search.to_lowercase();
        let mut out: Vec<&Game> = self
            .games
            .iter()
            .filter(|g| self.filter == Filter::All || g.installed)
            .filter(|g| needle.is_empty() || g.title.to_lowercase().contains(&needle))
            .collect();
        match self.sort {
            Sort::Recent => out.sort_by(|a, b| b.last_played.cmp(&a.last_played)),
            Sort::Alphabetical => out.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        out
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    /// Commit the search box into the visible set.
    pub fn apply_search(&mut self) {
        self.applied_search = self.search.trim().to_string();
        debug!(search = %self.applied_search, "library filters applied");
    }

    pub fn quick_resume(&self) -> impl Iterator<Item = &Game> {
        self.quick_resume.iter().filter_map(|id| self.get(id))
    }

    pub fn quick_resume_len(&self) -> usize {
        self.quick_resume.len()
    }

    /// Record a suspended title, most recent first, deduplicated, capped.
    pub fn suspend(&mut self, id: &str) {
        if self.get(id).is_none() {
            debug!(id, "suspend ignored for unknown game");
            return;
        }
        self.quick_resume.retain(|g| g != id);
        self.quick_resume.insert(0, id.to_string());
        self.quick_resume.truncate(QUICK_RESUME_MAX);
    }

    /// A resumed title leaves the ring (it is running again).
    pub fn resume(&mut self, id: &str) {
        self.quick_resume.retain(|g| g != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_filter_and_recent_sort() {
        let lib = {
            let mut l = Library::seeded();
            l.cycle_filter();
            l
        };
        let titles: Vec<&str> = lib.visible().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(titles, ["eldenring", "cyberpunk", "horizon", "minecraft"]);
    }

    #[test]
    fn search_applies_only_on_commit() {
        let mut lib = Library::seeded();
        lib.search = "elden".into();
        assert_eq!(lib.visible().len(), 6);
        lib.apply_search();
        let visible = lib.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "eldenring");
    }

    #[test]
    fn alphabetical_sort() {
        let mut lib = Library::seeded();
        lib.cycle_sort();
        let first = lib.visible()[0].id.clone();
        assert_eq!(first, "cyberpunk");
    }

    #[test]
    fn quick_resume_ring_dedupes_and_caps() {
        let mut lib = Library::seeded();
        for id in ["eldenring", "cyberpunk", "horizon", "tlou2", "gtavi", "minecraft"] {
            lib.suspend(id);
        }
        assert_eq!(lib.quick_resume_len(), QUICK_RESUME_MAX);
        // Most recent first; the oldest entry fell off.
        let ids: Vec<&str> = lib.quick_resume().map(|g| g.id.as_str()).collect();
        assert_eq!(ids[0], "minecraft");
        assert!(!ids.contains(&"eldenring"));

        lib.suspend("gtavi");
        let ids: Vec<&str> = lib.quick_resume().map(|g| g.id.as_str()).collect();
        assert_eq!(ids[0], "gtavi");
        assert_eq!(lib.quick_resume_len(), QUICK_RESUME_MAX);

        lib.resume("gtavi");
        assert_eq!(lib.quick_resume_len(), QUICK_RESUME_MAX - 1);
    }
}
