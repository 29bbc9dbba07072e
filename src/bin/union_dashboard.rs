use chrono::Utc;
use clap::{Parser, Subcommand};
use union_autobridge::{
    dashboard::{
        achievements::{
            categorize, most_recent, progress_bar, rank_achievements, top_by_xp, transfer_tasks,
            TaskChain, TaskSummary,
        },
        rank::{current_rank, next_rank_progress},
        Achievement, LeaderboardEntry, UserAchievement,
    },
    prelude::Result,
    BotConfig, DashboardClient,
};

#[derive(Debug, Parser)]
#[command(name = "union_dashboard", about = "Union dashboard XP, rank and achievement reports")]
struct Cli {
    /// Session token; falls back to UNION_JWT
    #[arg(long, env = "UNION_JWT", hide_env_values = true)]
    jwt: Option<String>,
    #[command(subcommand)]
    command: Option<Report>,
}

#[derive(Debug, Subcommand)]
enum Report {
    /// Level, XP and global rank
    Summary,
    /// XP breakdown and rank ladder position
    Xp,
    /// Earned achievements by category, top and recent
    Achievements,
    /// Every achievement the dashboard offers, with rank rewards
    All,
    /// Transfer achievements for the given chains
    Tasks {
        /// Comma separated, e.g. sei,corn. All chains when omitted
        #[arg(long, value_delimiter = ',')]
        chains: Vec<TaskChain>,
    },
}

const RULE: &str = "==================================================";

fn print_summary(entry: &LeaderboardEntry, client: &DashboardClient) {
    let claims = client.claims();
    println!("ACCOUNT SUMMARY\n{RULE}");
    println!("Display name: {}", entry.display_name.as_deref().unwrap_or("Unknown"));
    if let Some(full_name) = &claims.full_name {
        println!("Name: {full_name}");
    }
    if let Some(username) = &claims.username {
        println!("Username: {username}");
    }
    if let Some(email) = &claims.email {
        println!("Email: {email}");
    }
    println!("User ID: {}", entry.user_id);
    println!("Current rank: {} (Level {})", entry.title(), entry.level);
    println!("Current XP: {} XP", entry.current_xp);
    println!("Total XP earned: {} XP", entry.total_xp);
    println!("Global rank: #{}", entry.rank);
    println!("\nNext level: {}", entry.level + 1);
    println!("XP needed: {} XP", entry.xp_required - entry.current_xp);
    let progress = entry.level_progress();
    println!("{} {progress:.1}%", progress_bar(progress));
    println!(
        "Token expires in {} minutes",
        claims.expires_in(Utc::now().timestamp()) / 60
    );
}

fn print_xp(entry: &LeaderboardEntry) {
    println!("XP BREAKDOWN\n{RULE}");
    println!("Current XP: {} XP", entry.current_xp);
    println!("Total XP ever earned: {} XP", entry.total_xp);
    println!("XP used for leveling: {} XP", entry.total_xp - entry.current_xp);
    println!("XP needed for next level: {} XP", entry.xp_required);

    let rank = current_rank(entry.total_xp);
    let next = next_rank_progress(entry.total_xp);
    println!("\nRank ladder: {} (rank {})", rank.name, rank.level);
    match next.next_rank {
        Some(level) => {
            println!("Next: {} (rank {level}), {} XP to go", next.name, next.xp_needed);
            println!(
                "{} {}/{} XP {:.1}%",
                progress_bar(next.percentage),
                next.xp_progress,
                next.xp_for_next,
                next.percentage
            );
        }
        None => println!("{} {}", progress_bar(next.percentage), next.name),
    }
}

fn print_list(title: &str, achievements: &[&Achievement]) {
    println!("\n{title}\n{RULE}");
    for (i, achievement) in achievements.iter().enumerate() {
        println!("{}. {} - {} XP", i + 1, achievement.title, achievement.xp());
        println!("   {}", achievement.description());
        println!("   {}", achievement.category_path());
    }
}

fn print_achievements(earned: &[Achievement]) {
    if earned.is_empty() {
        println!("No personal achievements found.");
        return;
    }
    println!("ACHIEVEMENT BREAKDOWN\n{RULE}");
    for summary in categorize(earned).iter().filter(|s| s.count() > 0) {
        println!(
            "{}: {} achievements, {} XP ({:.1} avg)",
            summary.category.name(),
            summary.count(),
            summary.total_xp,
            summary.average_xp()
        );
    }
    println!(
        "Total XP from achievements: {}",
        earned.iter().map(Achievement::xp).sum::<i64>()
    );
    print_list("TOP ACHIEVEMENTS", &top_by_xp(earned, 10));
    print_list("RECENT ACHIEVEMENTS", &most_recent(earned, 5));
}

fn print_catalog(all: &[Achievement]) {
    println!("AVAILABLE ACHIEVEMENTS ({})\n{RULE}", all.len());
    for summary in categorize(all) {
        println!("{}: {} ({} XP)", summary.category.name(), summary.count(), summary.total_xp);
    }
    println!("\nRANK ACHIEVEMENTS\n{RULE}");
    for achievement in rank_achievements(all) {
        let level = achievement
            .meta
            .as_ref()
            .and_then(|m| m.level)
            .map(|l| l.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("Level {level}: {}", achievement.title);
        for reward in achievement.reward_titles() {
            println!("   Reward: {reward}");
        }
    }
}

fn print_tasks(all: &[Achievement], earned: &[UserAchievement], chains: &[TaskChain]) {
    let chains = if chains.is_empty() {
        TaskChain::ALL.to_vec()
    } else {
        chains.to_vec()
    };
    let tasks = transfer_tasks(all, earned, &chains);
    if tasks.is_empty() {
        println!("No transfer-related achievements found for the selected chains.");
        return;
    }

    println!("TRANSFER TASKS\n{RULE}");
    let groups = TaskChain::ALL.into_iter().map(Some).chain([None]);
    for group in groups {
        let in_group: Vec<_> = tasks.iter().filter(|t| t.chain == group).collect();
        if in_group.is_empty() {
            continue;
        }
        println!("\n{}:", group.map(|c| c.name()).unwrap_or("Other Chains"));
        for task in in_group {
            let status = if task.completed { "COMPLETED" } else { "AVAILABLE" };
            println!("{status} {} - {} XP", task.achievement.title, task.achievement.xp());
            println!("   {}", task.achievement.description());
            if let (Some(target), false) = (task.target, task.completed) {
                println!("   Target: {target} transfers");
            }
        }
    }

    let summary = TaskSummary::of(&tasks);
    println!("\nTotal tasks: {}, completed: {}", summary.total, summary.completed);
    println!(
        "XP earned: {}/{} ({:.1}% complete)",
        summary.earned_xp,
        summary.total_xp,
        summary.completion_rate()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let config = BotConfig::from_env()?;
    let cli = Cli::parse();
    let jwt = match cli.jwt {
        Some(jwt) => jwt,
        None => config.jwt()?,
    };
    let client = DashboardClient::new(None, Some(config.dashboard_url.as_str()), &jwt)?;

    match cli.command.unwrap_or(Report::Summary) {
        Report::Summary => print_summary(&client.leaderboard_entry().await?, &client),
        Report::Xp => print_xp(&client.leaderboard_entry().await?),
        Report::Achievements => {
            let earned: Vec<Achievement> = client
                .user_achievements()
                .await
                .into_iter()
                .map(|ua| ua.achievement)
                .collect();
            print_achievements(&earned);
        }
        Report::All => print_catalog(&client.all_achievements().await?),
        Report::Tasks { chains } => {
            let all = client.all_achievements().await?;
            let earned = client.user_achievements().await;
            print_tasks(&all, &earned, &chains);
        }
    }
    Ok(())
}
