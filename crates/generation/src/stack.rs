//! Target stack table.

use refactorium_core::Ecosystem;

use crate::ecosystem::{classify_keywords, StackKeywords};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Proposed stack for an already-classified ecosystem.
///
/// The Python and JavaScript entries refine on the keywords.
pub fn proposed_stack(ecosystem: Ecosystem, keywords: &StackKeywords) -> Vec<String> {
    match ecosystem {
        Ecosystem::Swift => labels(&[
            "Swift 5.10+",
            "SwiftUI",
            "Combine",
            "Swift Package Manager",
            "XCTest",
        ]),
        Ecosystem::Python => {
            let mut stack = labels(&["Python 3.12+"]);
            let rest: &[&str] = if keywords.contains("streamlit") {
                &["Streamlit (latest)", "Plotly", "Pandas", "Poetry"]
            } else if keywords.contains("django") {
                &["Django 5.x", "Django REST Framework", "PostgreSQL", "Poetry"]
            } else if keywords.contains("flask") {
                &["FastAPI", "Pydantic", "SQLAlchemy", "PostgreSQL", "Poetry"]
            } else {
                &["FastAPI", "Pydantic", "PostgreSQL", "Poetry"]
            };
            stack.extend(labels(rest));
            stack
        }
        Ecosystem::Kotlin => labels(&[
            "Kotlin 1.9+",
            "Ktor or Spring Boot",
            "Exposed or Room",
            "PostgreSQL",
        ]),
        Ecosystem::Java => labels(&[
            "Java 21 LTS",
            "Spring Boot 3.x",
            "Maven/Gradle",
            "PostgreSQL",
            "JUnit 5",
        ]),
        Ecosystem::Go => labels(&["Go 1.22+", "Gin or Echo", "GORM", "PostgreSQL", "Testify"]),
        Ecosystem::Rust => labels(&[
            "Rust (latest stable)",
            "Actix-web or Axum",
            "Diesel or SQLx",
            "PostgreSQL",
        ]),
        Ecosystem::Ruby => labels(&["Ruby 3.3+", "Rails 7.x", "PostgreSQL", "RSpec", "Bundler"]),
        Ecosystem::CSharp => labels(&[
            ".NET 8",
            "ASP.NET Core",
            "Entity Framework Core",
            "PostgreSQL",
            "xUnit",
        ]),
        Ecosystem::Php => labels(&["PHP 8.3+", "Laravel 11", "Composer", "PostgreSQL", "PHPUnit"]),
        Ecosystem::Electron => labels(&[
            "Electron (latest)",
            "TypeScript",
            "Vite",
            "React or Vue",
            "Tailwind CSS",
        ]),
        Ecosystem::JavaScript => {
            let mut stack = labels(&["React", "TypeScript", "Vite", "Tailwind CSS"]);
            if keywords.contains_any(&["express", "node"]) {
                stack.extend(labels(&["Node.js 20+", "Express", "Prisma", "PostgreSQL"]));
            }
            stack
        }
    }
}

/// Classify `current` and return the ecosystem with its proposed stack.
pub fn propose<S: AsRef<str>>(current: &[S]) -> (Ecosystem, Vec<String>) {
    let keywords = StackKeywords::new(current);
    let ecosystem = classify_keywords(&keywords);
    (ecosystem, proposed_stack(ecosystem, &keywords))
}
