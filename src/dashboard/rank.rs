#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub level: u32,
    pub name: &'static str,
    pub xp_required: i64,
}

const fn rank(level: u32, name: &'static str, xp_required: i64) -> Rank {
    Rank {
        level,
        name,
        xp_required,
    }
}

pub const RANKS: [Rank; 12] = [
    rank(1, "Conscript", 0),
    rank(2, "Private First Class", 50),
    rank(3, "Junior Sergeant", 100),
    rank(4, "Sergeant", 200),
    rank(5, "Senior Sergeant", 350),
    rank(6, "Starshina", 500),
    rank(7, "Junior Lieutenant", 700),
    rank(8, "Lieutenant", 950),
    rank(9, "Senior Lieutenant", 1250),
    rank(10, "Junior Captain", 1600),
    rank(11, "Captain", 2000),
    rank(12, "Senior Captain", 2500),
];

pub const MAX_RANK_NAME: &str = "Max Rank Reached";

#[derive(Debug, Clone, PartialEq)]
pub struct RankProgress {
    pub next_rank: Option<u32>,
    pub name: &'static str,
    pub xp_needed: i64,
    pub xp_progress: i64,
    pub xp_for_next: i64,
    pub percentage: f64,
}

/// Highest rank whose threshold `total_xp` reaches; Conscript below zero.
pub fn current_rank(total_xp: i64) -> &'static Rank {
    RANKS
        .iter()
        .take_while(|r| total_xp >= r.xp_required)
        .last()
        .unwrap_or(&RANKS[0])
}

pub fn next_rank_progress(total_xp: i64) -> RankProgress {
    let current = current_rank(total_xp);
    let Some(next) = RANKS.get(current.level as usize) else {
        return RankProgress {
            next_rank: None,
            name: MAX_RANK_NAME,
            xp_needed: 0,
            xp_progress: 0,
            xp_for_next: 0,
            percentage: 100.0,
        };
    };

    let xp_for_next = next.xp_required - current.xp_required;
    let xp_progress = total_xp - current.xp_required;
    RankProgress {
        next_rank: Some(next.level),
        name: next.name,
        xp_needed: next.xp_required - total_xp,
        xp_progress,
        xp_for_next,
        percentage: (xp_progress as f64 / xp_for_next as f64 * 100.0).min(100.0),
    }
}
