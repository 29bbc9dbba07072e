use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: Option<String>,
    pub pfp: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub current_xp: i64,
    #[serde(default)]
    pub total_xp: i64,
    #[serde(default)]
    pub xp_required: i64,
    #[serde(default)]
    pub rank: u64,
}

impl LeaderboardEntry {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }

    /// Share of the current level already earned.
    pub fn level_progress(&self) -> f64 {
        if self.xp_required <= 0 {
            return 100.0;
        }
        (self.current_xp as f64 / self.xp_required as f64 * 100.0).min(100.0)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AchievementMeta {
    pub level: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Reward {
    pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RewardAchievement {
    pub rewards: Option<Reward>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub xp: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    pub created_at: Option<String>,
    pub meta: Option<AchievementMeta>,
    #[serde(default)]
    pub reward_achievements: Vec<RewardAchievement>,
    pub category: Option<Category>,
    pub subcategory: Option<Category>,
}

impl Achievement {
    pub fn xp(&self) -> i64 {
        self.xp.unwrap_or(0)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn category_path(&self) -> String {
        let title = |c: &Option<Category>| {
            c.as_ref()
                .map(|c| c.title.clone())
                .unwrap_or_else(|| "N/A".to_string())
        };
        format!("{} > {}", title(&self.category), title(&self.subcategory))
    }

    pub fn reward_titles(&self) -> Vec<&str> {
        self.reward_achievements
            .iter()
            .filter_map(|r| r.rewards.as_ref())
            .map(|r| r.title.as_str())
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserAchievement {
    pub achievement: Achievement,
    pub created_at: Option<String>,
}
