/// Color for languages missing from the palette.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#A3A3A3";

/// Color of the "Polyglot" placeholder entry.
pub const POLYGLOT_COLOR: &str = "#FFFFFF";

/// Display color for a repository's primary language, as reported by GitHub.
pub fn language_color(language: &str) -> &'static str {
    match language {
        // Web
        "TypeScript" => "#3178C6",
        "JavaScript" => "#F7DF1E",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "SCSS" => "#c6538c",
        "Vue" => "#41b883",
        "React" => "#61dafb",
        "Svelte" => "#ff3e00",
        // Systems
        "Rust" => "#dea584",
        "Go" => "#00ADD8",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "Zig" => "#ec915c",
        // JVM / .NET
        "Java" => "#b07219",
        "Kotlin" => "#A97BFF",
        "Scala" => "#c22d40",
        "C#" => "#178600",
        // Apple
        "Swift" => "#F05138",
        "Objective-C" => "#438eff",
        // Scripting
        "Python" => "#3572A5",
        "Jupyter Notebook" => "#DA5B0B",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Shell" => "#89e051",
        "Lua" => "#000080",
        "Dart" => "#00B4AB",
        // Functional
        "Haskell" => "#5e5086",
        "Elixir" => "#6e4a7e",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}
