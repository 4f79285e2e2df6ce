use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitstory::github::demo::DEMO_USERNAME;
use gitstory::{Config, DemoSource, GitHubClient, StoryOptions, StoryPipeline, StorySummary};

#[derive(Parser, Debug)]
#[command(name = "gitstory")]
#[command(version = "0.1.0")]
#[command(about = "Turn a year of GitHub activity into a story")]
struct Args {
    /// GitHub username ("demo" for a canned story)
    #[arg(short, long)]
    username: String,

    /// Year to summarize
    #[arg(short, long)]
    year: Option<i32>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Hours east of UTC used for the time-of-day profile
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitstory=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration, CLI flags take precedence
    let mut config = Config::from_env()?;
    if let Some(year) = args.year {
        config.year = year;
    }
    if let Some(offset) = args.utc_offset {
        config.utc_offset_hours = offset;
    }
    if args.token.is_some() {
        config.github_token = args.token.clone();
    }
    config.validate()?;

    let options = StoryOptions::try_from(&config)?;

    let (pipeline, username) = if DemoSource::handles(&args.username) {
        tracing::info!("Using the built-in demo account");
        let demo = DemoSource::for_year(options.year);
        (StoryPipeline::new(demo, options), DEMO_USERNAME)
    } else {
        let github = GitHubClient::from_config(&config)?;
        (StoryPipeline::new(github, options), args.username.trim())
    };

    let story = pipeline.generate(username).await?;

    output_story(&story, &args)?;

    Ok(())
}

fn output_story(story: &StorySummary, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(story)?,
        "markdown" => format_markdown(story),
        _ => format_text(story),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(story: &StorySummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== {} in {} ===\n\n",
        story.display_name, story.year
    ));
    output.push_str(&format!("Archetype: {}\n\n", story.archetype));

    output.push_str(&format!("Commits: {}\n", story.total_commits));
    output.push_str(&format!("Longest streak: {} days\n", story.longest_streak));
    output.push_str(&format!("Busiest day: {}\n", story.busiest_day));
    output.push_str(&format!(
        "Peak hour: {:02}:00 ({})\n",
        story.productivity.peak_hour, story.productivity.time_of_day
    ));

    let breakdown = &story.contribution_breakdown;
    output.push_str("\nContributions (estimated):\n");
    output.push_str(&format!("  Commits: {}\n", breakdown.commits));
    output.push_str(&format!("  Pull requests: ~{}\n", breakdown.pull_requests));
    output.push_str(&format!("  Issues: ~{}\n", breakdown.issues));
    output.push_str(&format!("  Reviews: ~{}\n", breakdown.reviews));

    output.push_str("\nTop Languages:\n");
    for language in &story.top_languages {
        output.push_str(&format!(
            "  - {}: {} repos ({}%)\n",
            language.name, language.count, language.percentage
        ));
    }

    let repo = &story.top_repository;
    output.push_str(&format!("\nTop Repository: {} ({} stars)\n", repo.name, repo.stars));
    output.push_str(&format!("  {}\n", repo.description));
    if let Some(ref language) = repo.language {
        output.push_str(&format!("  Language: {}\n", language));
    }

    let community = &story.community;
    output.push_str(&format!(
        "\nCommunity: {} followers, {} following, {} public repos, {} stars\n",
        community.followers, community.following, community.public_repos, community.total_stars
    ));

    output
}

fn format_markdown(story: &StorySummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {} in {}\n\n", story.display_name, story.year));
    if !story.avatar_url.is_empty() {
        output.push_str(&format!(
            "![{}]({})\n\n",
            story.username, story.avatar_url
        ));
    }
    output.push_str(&format!("> **{}**\n\n", story.archetype));

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Commits | {} |\n", story.total_commits));
    output.push_str(&format!("| Longest Streak | {} days |\n", story.longest_streak));
    output.push_str(&format!("| Busiest Day | {} |\n", story.busiest_day));
    output.push_str(&format!(
        "| Peak Hour | {:02}:00 ({}) |\n",
        story.productivity.peak_hour, story.productivity.time_of_day
    ));

    let breakdown = &story.contribution_breakdown;
    output.push_str("\n## Contributions\n\n");
    output.push_str("| Type | Count |\n|------|-------|\n");
    output.push_str(&format!("| Commits | {} |\n", breakdown.commits));
    output.push_str(&format!("| Pull Requests | ~{} |\n", breakdown.pull_requests));
    output.push_str(&format!("| Issues | ~{} |\n", breakdown.issues));
    output.push_str(&format!("| Reviews | ~{} |\n", breakdown.reviews));

    output.push_str("\n## Top Languages\n\n");
    output.push_str("| Language | Repos | Share |\n|----------|-------|-------|\n");
    for language in &story.top_languages {
        output.push_str(&format!(
            "| {} | {} | {}% |\n",
            language.name, language.count, language.percentage
        ));
    }

    let repo = &story.top_repository;
    output.push_str("\n## Top Repository\n\n");
    if repo.url.is_empty() {
        output.push_str(&format!("**{}**", repo.name));
    } else {
        output.push_str(&format!("**[{}]({})**", repo.name, repo.url));
    }
    output.push_str(&format!(" ({} stars)\n\n{}\n", repo.stars, repo.description));
    if !repo.topics.is_empty() {
        output.push_str(&format!("\nTopics: {}\n", repo.topics.join(", ")));
    }

    let community = &story.community;
    output.push_str("\n## Community\n\n");
    output.push_str("| Followers | Following | Public Repos | Stars |\n");
    output.push_str("|-----------|-----------|--------------|-------|\n");
    output.push_str(&format!(
        "| {} | {} | {} | {} |\n",
        community.followers, community.following, community.public_repos, community.total_stars
    ));

    output
}
