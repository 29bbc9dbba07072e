//! Grouping and ranking of dashboard achievements for the report views.

use super::response_structs::{Achievement, UserAchievement};
use crate::{prelude::Result, Error};
use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// `type` the dashboard assigns to rank-up achievements.
pub const RANK_ACHIEVEMENT_TYPE: i64 = 14;
const PROGRESS_BAR_CELLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    Social,
    OnChain,
    Ranks,
    Other,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 4] = [
        AchievementCategory::Social,
        AchievementCategory::OnChain,
        AchievementCategory::Ranks,
        AchievementCategory::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Social => "Social",
            AchievementCategory::OnChain => "On-Chain",
            AchievementCategory::Ranks => "Ranks",
            AchievementCategory::Other => "Other",
        }
    }

    pub fn of(achievement: &Achievement) -> Self {
        if achievement.kind == Some(RANK_ACHIEVEMENT_TYPE) {
            return AchievementCategory::Ranks;
        }
        let title = achievement
            .category
            .as_ref()
            .map(|c| c.title.to_lowercase())
            .unwrap_or_default();
        match title.as_str() {
            "social" => AchievementCategory::Social,
            "onchain" => AchievementCategory::OnChain,
            _ => AchievementCategory::Other,
        }
    }
}

#[derive(Debug)]
pub struct CategorySummary<'a> {
    pub category: AchievementCategory,
    pub achievements: Vec<&'a Achievement>,
    pub total_xp: i64,
}

impl CategorySummary<'_> {
    pub fn count(&self) -> usize {
        self.achievements.len()
    }

    pub fn average_xp(&self) -> f64 {
        if self.achievements.is_empty() {
            return 0.0;
        }
        self.total_xp as f64 / self.achievements.len() as f64
    }
}

/// One summary per category, always in Social, On-Chain, Ranks, Other order.
pub fn categorize<'a>(
    achievements: impl IntoIterator<Item = &'a Achievement>,
) -> Vec<CategorySummary<'a>> {
    let mut summaries: Vec<CategorySummary<'a>> = AchievementCategory::ALL
        .iter()
        .map(|&category| CategorySummary {
            category,
            achievements: Vec::new(),
            total_xp: 0,
        })
        .collect();
    for achievement in achievements {
        let category = AchievementCategory::of(achievement);
        if let Some(summary) = summaries.iter_mut().find(|s| s.category == category) {
            summary.total_xp += achievement.xp();
            summary.achievements.push(achievement);
        }
    }
    summaries
}

pub fn top_by_xp(achievements: &[Achievement], limit: usize) -> Vec<&Achievement> {
    let mut top: Vec<&Achievement> = achievements.iter().filter(|a| a.xp() > 0).collect();
    top.sort_by(|a, b| b.xp().cmp(&a.xp()));
    top.truncate(limit);
    top
}

fn created_at(achievement: &Achievement) -> Option<DateTime<FixedOffset>> {
    achievement
        .created_at
        .as_deref()
        .and_then(|at| DateTime::parse_from_rfc3339(at).ok())
}

/// Newest first; entries without a parseable `created_at` are skipped.
pub fn most_recent(achievements: &[Achievement], limit: usize) -> Vec<&Achievement> {
    let mut dated: Vec<(DateTime<FixedOffset>, &Achievement)> = achievements
        .iter()
        .filter_map(|a| created_at(a).map(|at| (at, a)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.into_iter().take(limit).map(|(_, a)| a).collect()
}

pub fn rank_achievements(achievements: &[Achievement]) -> Vec<&Achievement> {
    let mut ranks: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| a.kind == Some(RANK_ACHIEVEMENT_TYPE))
        .collect();
    ranks.sort_by_key(|a| a.meta.as_ref().and_then(|m| m.level).unwrap_or(0));
    ranks
}

lazy_static! {
    /// Tried in order; the first that matches wins.
    static ref TRANSFER_COUNT_PATTERNS: Vec<Regex> = [
        r"(?i)([0-9]+)\s+transfers?",
        r"(?i)([0-9]+)\s+transactions?",
        r"(?i)([0-9]+)\s+times?",
        r"(?i)complete\s+([0-9]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect();
}

/// Target count from descriptions like "Make 500 transfers" or "Complete 10 swaps".
pub fn extract_transfer_count(description: &str) -> Option<u64> {
    TRANSFER_COUNT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(description)
            .and_then(|caps| caps[1].parse().ok())
    })
}

/// `[████░░…]`, twenty cells wide.
pub fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * PROGRESS_BAR_CELLS as f64).round();
    let filled = filled.clamp(0.0, PROGRESS_BAR_CELLS as f64) as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_CELLS - filled)
    )
}

/// Chains the transfer task view can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskChain {
    Babylon,
    Sei,
    Xion,
    Osmosis,
    Corn,
    Ethereum,
    Arbitrum,
    Berachain,
}

impl TaskChain {
    pub const ALL: [TaskChain; 8] = [
        TaskChain::Babylon,
        TaskChain::Sei,
        TaskChain::Xion,
        TaskChain::Osmosis,
        TaskChain::Corn,
        TaskChain::Ethereum,
        TaskChain::Arbitrum,
        TaskChain::Berachain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskChain::Babylon => "Babylon",
            TaskChain::Sei => "Sei",
            TaskChain::Xion => "Xion",
            TaskChain::Osmosis => "Osmosis",
            TaskChain::Corn => "Corn",
            TaskChain::Ethereum => "Ethereum (Sepolia/Holesky)",
            TaskChain::Arbitrum => "Arbitrum",
            TaskChain::Berachain => "Berachain",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TaskChain::Babylon => "babylon",
            TaskChain::Sei => "sei",
            TaskChain::Xion => "xion",
            TaskChain::Osmosis => "osmosis",
            TaskChain::Corn => "corn",
            TaskChain::Ethereum => "ethereum",
            TaskChain::Arbitrum => "arbitrum",
            TaskChain::Berachain => "berachain",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            TaskChain::Babylon => &["babylon"],
            TaskChain::Sei => &["sei", "pacific", "seitestnet"],
            TaskChain::Xion => &["xion"],
            TaskChain::Osmosis => &["osmosis", "osmo"],
            TaskChain::Corn => &["corn", "btcn"],
            TaskChain::Ethereum => &["sepolia", "holesky", "ethereum"],
            TaskChain::Arbitrum => &["arbitrum"],
            TaskChain::Berachain => &["berachain", "bera", "artio"],
        }
    }

    pub fn matches(&self, achievement: &Achievement) -> bool {
        let (title, description) = lowercase_text(achievement);
        self.keywords()
            .iter()
            .any(|k| title.contains(k) || description.contains(k))
    }

    /// First chain in [`TaskChain::ALL`] order the achievement mentions.
    pub fn of(achievement: &Achievement) -> Option<TaskChain> {
        TaskChain::ALL.into_iter().find(|c| c.matches(achievement))
    }
}

impl fmt::Display for TaskChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskChain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TaskChain::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| Error::GenericParse(format!("unknown chain {s:?}")))
    }
}

fn lowercase_text(achievement: &Achievement) -> (String, String) {
    (
        achievement.title.to_lowercase(),
        achievement.description().to_lowercase(),
    )
}

pub fn is_transfer_related(achievement: &Achievement) -> bool {
    let (title, description) = lowercase_text(achievement);
    ["transfer", "bridge", "cross-chain", "interacted"]
        .iter()
        .any(|k| title.contains(k) || description.contains(k))
}

#[derive(Debug)]
pub struct TransferTask<'a> {
    pub achievement: &'a Achievement,
    /// `None` groups under "Other Chains"
    pub chain: Option<TaskChain>,
    pub completed: bool,
    pub target: Option<u64>,
}

/// Transfer-related achievements mentioning any of `chains`, marked against
/// what the user already earned.
pub fn transfer_tasks<'a>(
    all: &'a [Achievement],
    earned: &[UserAchievement],
    chains: &[TaskChain],
) -> Vec<TransferTask<'a>> {
    let earned: HashSet<i64> = earned.iter().map(|ua| ua.achievement.id).collect();
    all.iter()
        .filter(|a| is_transfer_related(a))
        .filter(|a| chains.iter().any(|c| c.matches(a)))
        .map(|achievement| TransferTask {
            achievement,
            chain: TaskChain::of(achievement),
            completed: earned.contains(&achievement.id),
            target: extract_transfer_count(achievement.description()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub total_xp: i64,
    pub earned_xp: i64,
}

impl TaskSummary {
    pub fn of(tasks: &[TransferTask<'_>]) -> Self {
        tasks.iter().fold(TaskSummary::default(), |mut summary, task| {
            summary.total += 1;
            summary.total_xp += task.achievement.xp();
            if task.completed {
                summary.completed += 1;
                summary.earned_xp += task.achievement.xp();
            }
            summary
        })
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn achievement(value: serde_json::Value) -> Achievement {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<Achievement> {
        vec![
            achievement(json!({"id": 1, "title": "Follow on X", "xp": 10, "type": 1,
                "created_at": "2025-01-02T00:00:00+00:00",
                "category": {"id": 1, "title": "Social"}})),
            achievement(json!({"id": 2, "title": "Bridge 10 times", "xp": 50, "type": 3,
                "description": "Transfer from Sepolia to Holesky 10 times",
                "created_at": "2025-03-01T12:00:00.123456+00:00",
                "category": {"id": 2, "title": "OnChain"},
                "subcategory": {"id": 9, "title": "Transfers"}})),
            achievement(json!({"id": 3, "title": "Sergeant", "xp": 0, "type": 14,
                "meta": {"level": 4},
                "reward_achievements": [{"rewards": {"title": "Badge"}}]})),
            achievement(json!({"id": 4, "title": "Conscript", "type": 14,
                "meta": {"level": 1}, "created_at": "not a date"})),
            achievement(json!({"id": 5, "title": "Mystery", "xp": 5,
                "created_at": "2025-02-01T00:00:00Z", "category": null})),
        ]
    }

    #[test]
    fn categories_follow_type_then_title() {
        let all = sample();
        let summaries = categorize(&all);
        let counts: Vec<(&str, usize, i64)> = summaries
            .iter()
            .map(|s| (s.category.name(), s.count(), s.total_xp))
            .collect();
        assert_eq!(
            counts,
            vec![("Social", 1, 10), ("On-Chain", 1, 50), ("Ranks", 2, 0), ("Other", 1, 5)]
        );
        assert_eq!(summaries[3].average_xp(), 5.0);
    }

    #[test]
    fn top_skips_zero_xp() {
        let all = sample();
        let top: Vec<i64> = top_by_xp(&all, 10).iter().map(|a| a.id).collect();
        assert_eq!(top, vec![2, 1, 5]);
        assert_eq!(top_by_xp(&all, 1).len(), 1);
    }

    #[test]
    fn recent_is_newest_first() {
        let all = sample();
        let recent: Vec<i64> = most_recent(&all, 5).iter().map(|a| a.id).collect();
        assert_eq!(recent, vec![2, 5, 1]);
    }

    #[test]
    fn rank_achievements_sorted_by_level() {
        let all = sample();
        let ranks = rank_achievements(&all);
        assert_eq!(ranks.iter().map(|a| a.id).collect::<Vec<_>>(), vec![4, 3]);
        assert_eq!(ranks[1].reward_titles(), vec!["Badge"]);
        assert_eq!(all[1].category_path(), "OnChain > Transfers");
        assert_eq!(all[0].category_path(), "Social > N/A");
    }

    #[test]
    fn transfer_counts_are_extracted() {
        assert_eq!(extract_transfer_count("Make 500 Transfers to Sei"), Some(500));
        assert_eq!(extract_transfer_count("Send 1 transfer"), Some(1));
        assert_eq!(extract_transfer_count("Sign 25  transactions"), Some(25));
        assert_eq!(extract_transfer_count("Bridge 3 times"), Some(3));
        assert_eq!(extract_transfer_count("COMPLETE 7 swaps"), Some(7));
        assert_eq!(extract_transfer_count("Complete\t3 quests"), Some(3));
        assert_eq!(extract_transfer_count("Vote 1 Time"), Some(1));
        assert_eq!(extract_transfer_count("Reach level 5"), None);
        assert_eq!(extract_transfer_count("12transfers"), None);
        assert_eq!(extract_transfer_count("completed 4"), None);
    }

    #[test]
    fn transfer_pattern_wins_over_later_ones() {
        assert_eq!(
            extract_transfer_count("Complete 2 rounds of 100 transfers"),
            Some(100)
        );
    }

    #[test]
    fn progress_bar_is_twenty_cells() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "░".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "█".repeat(10), "░".repeat(10)));
        assert_eq!(progress_bar(250.0), format!("[{}]", "█".repeat(20)));
        assert_eq!(progress_bar(-3.0), format!("[{}]", "░".repeat(20)));
    }

    #[test]
    fn transfer_tasks_filter_and_mark_completion() {
        let all = sample();
        let earned: Vec<UserAchievement> = vec![serde_json::from_value(json!({
            "achievement": {"id": 2, "title": "Bridge 10 times"}
        }))
        .unwrap()];

        let tasks = transfer_tasks(&all, &earned, &[TaskChain::Ethereum]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].chain, Some(TaskChain::Ethereum));
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].target, Some(10));
        assert!(transfer_tasks(&all, &earned, &[TaskChain::Xion]).is_empty());

        let summary = TaskSummary::of(&tasks);
        assert_eq!(summary.earned_xp, 50);
        assert_eq!(summary.completion_rate(), 100.0);
    }

    #[test]
    fn chains_parse_by_name() {
        assert_eq!("Corn".parse::<TaskChain>().unwrap(), TaskChain::Corn);
        assert_eq!("ethereum".parse::<TaskChain>().unwrap(), TaskChain::Ethereum);
        assert!("solana".parse::<TaskChain>().is_err());
    }
}
