//! Migration phase catalog.
//!
//! Every ecosystem gets the same three-phase shape: setup, core migration,
//! refinement.

use refactorium_core::{Ecosystem, MigrationPhase, Priority};

/// Static description of one phase.
struct PhaseSpec {
    title: &'static str,
    description: &'static str,
    tasks: &'static [&'static str],
    priority: Priority,
}

const fn setup(description: &'static str, tasks: &'static [&'static str]) -> PhaseSpec {
    PhaseSpec {
        title: "Setup & Planning",
        description,
        tasks,
        priority: Priority::High,
    }
}

const fn core_migration(description: &'static str, tasks: &'static [&'static str]) -> PhaseSpec {
    PhaseSpec {
        title: "Core Migration",
        description,
        tasks,
        priority: Priority::High,
    }
}

const fn refinement(tasks: &'static [&'static str]) -> PhaseSpec {
    PhaseSpec {
        title: "Refinement",
        description: "Polish and optimize",
        tasks,
        priority: Priority::Medium,
    }
}

static SWIFT: [PhaseSpec; 3] = [
    setup(
        "Modernize Swift environment",
        &[
            "Update to Swift 5.10+",
            "Migrate to SwiftUI if using UIKit",
            "Set up Swift Package Manager",
            "Configure SwiftLint",
            "Set up XCTest for testing",
        ],
    ),
    core_migration(
        "Modernize Swift code",
        &[
            "Use async/await for concurrency",
            "Implement Combine for reactive programming",
            "Use property wrappers",
            "Add comprehensive unit tests",
            "Implement proper error handling",
        ],
    ),
    refinement(&[
        "Performance optimization with Instruments",
        "Accessibility improvements",
        "Documentation with DocC",
        "Final testing and deployment",
    ]),
];

static PYTHON: [PhaseSpec; 3] = [
    setup(
        "Prepare the Python environment and tooling",
        &[
            "Set up Python 3.11+ virtual environment",
            "Configure poetry or pip-tools for dependency management",
            "Set up pytest and coverage tools",
            "Configure black, isort, and mypy for code quality",
            "Set up pre-commit hooks",
        ],
    ),
    core_migration(
        "Modernize Python code and dependencies",
        &[
            "Update to latest framework versions",
            "Add type hints throughout codebase",
            "Refactor long functions and complex logic",
            "Implement async/await where beneficial",
            "Add comprehensive unit tests",
        ],
    ),
    refinement(&[
        "Performance profiling and optimization",
        "Security audit and updates",
        "Documentation with Sphinx or MkDocs",
        "Final testing and deployment",
    ]),
];

static KOTLIN: [PhaseSpec; 3] = [
    setup(
        "Modernize Kotlin environment",
        &[
            "Update to Kotlin 1.9+",
            "Set up Gradle with Kotlin DSL",
            "Configure ktlint and detekt",
            "Set up JUnit 5 or Kotest",
            "Implement proper project structure",
        ],
    ),
    core_migration(
        "Modernize Kotlin code",
        &[
            "Use coroutines for async operations",
            "Implement sealed classes and interfaces",
            "Use data classes and value classes",
            "Add comprehensive unit tests",
            "Implement proper null safety",
        ],
    ),
    refinement(&[
        "Performance optimization",
        "Security audit",
        "Documentation with KDoc",
        "Final testing and deployment",
    ]),
];

static JAVA: [PhaseSpec; 3] = [
    setup(
        "Modernize Java environment and tooling",
        &[
            "Update to Java 21 LTS",
            "Migrate to Spring Boot 3.x",
            "Set up Maven or Gradle with latest versions",
            "Configure JUnit 5 for testing",
            "Set up Checkstyle and SpotBugs",
        ],
    ),
    core_migration(
        "Modernize Java code and patterns",
        &[
            "Use records for data classes",
            "Implement sealed classes where appropriate",
            "Use pattern matching and switch expressions",
            "Migrate to virtual threads (Project Loom)",
            "Add comprehensive unit and integration tests",
        ],
    ),
    refinement(&[
        "Performance profiling and optimization",
        "Security audit with OWASP guidelines",
        "Documentation with JavaDoc",
        "Final testing and deployment",
    ]),
];

static GO: [PhaseSpec; 3] = [
    setup(
        "Modernize Go environment",
        &[
            "Update to Go 1.22+",
            "Set up Go modules properly",
            "Configure golangci-lint",
            "Set up testing with testify",
            "Implement proper project structure",
        ],
    ),
    core_migration(
        "Modernize Go code",
        &[
            "Use generics where appropriate",
            "Implement context for cancellation",
            "Use structured logging (slog)",
            "Add proper error handling with errors.Is/As",
            "Implement comprehensive tests",
        ],
    ),
    refinement(&[
        "Performance profiling with pprof",
        "Race condition detection",
        "Documentation with godoc",
        "Final testing and deployment",
    ]),
];

static RUST: [PhaseSpec; 3] = [
    setup(
        "Modernize Rust environment",
        &[
            "Update to latest stable Rust",
            "Configure Cargo.toml with workspace",
            "Set up clippy and rustfmt",
            "Configure CI with cargo test",
            "Set up proper error handling with thiserror/anyhow",
        ],
    ),
    core_migration(
        "Modernize Rust code",
        &[
            "Use async/await with tokio or async-std",
            "Implement proper lifetime annotations",
            "Use const generics where appropriate",
            "Add comprehensive unit and integration tests",
            "Implement proper documentation",
        ],
    ),
    refinement(&[
        "Performance optimization with benchmarks",
        "Security audit with cargo-audit",
        "Documentation with rustdoc",
        "Final testing and deployment",
    ]),
];

static RUBY: [PhaseSpec; 3] = [
    setup(
        "Modernize Ruby environment",
        &[
            "Update to Ruby 3.3+",
            "Migrate to Rails 7.x if using Rails",
            "Set up RuboCop for linting",
            "Configure RSpec for testing",
            "Set up Bundler properly",
        ],
    ),
    core_migration(
        "Modernize Ruby code",
        &[
            "Use pattern matching",
            "Implement Ractors for concurrency",
            "Use endless methods and numbered parameters",
            "Add type signatures with RBS or Sorbet",
            "Add comprehensive tests",
        ],
    ),
    refinement(&[
        "Performance optimization",
        "Security audit with Brakeman",
        "Documentation with YARD",
        "Final testing and deployment",
    ]),
];

static CSHARP: [PhaseSpec; 3] = [
    setup(
        "Modernize .NET environment",
        &[
            "Update to .NET 8",
            "Migrate to ASP.NET Core",
            "Set up Entity Framework Core",
            "Configure xUnit for testing",
            "Set up StyleCop and analyzers",
        ],
    ),
    core_migration(
        "Modernize C# code",
        &[
            "Use records and init-only properties",
            "Implement nullable reference types",
            "Use pattern matching and switch expressions",
            "Migrate to minimal APIs",
            "Add comprehensive unit tests",
        ],
    ),
    refinement(&[
        "Performance optimization",
        "Security audit",
        "Documentation with XML comments",
        "Final testing and deployment",
    ]),
];

static PHP: [PhaseSpec; 3] = [
    setup(
        "Modernize PHP environment",
        &[
            "Update to PHP 8.3+",
            "Set up Composer for dependency management",
            "Configure PHPStan or Psalm for static analysis",
            "Set up PHPUnit for testing",
            "Configure Laravel or modern framework",
        ],
    ),
    core_migration(
        "Migrate to modern PHP",
        &[
            "Use typed properties and return types",
            "Implement PSR standards",
            "Refactor to use modern PHP features",
            "Add comprehensive tests",
            "Implement proper error handling",
        ],
    ),
    refinement(&[
        "Performance optimization",
        "Security hardening",
        "Documentation updates",
        "Final testing and deployment",
    ]),
];

static ELECTRON: [PhaseSpec; 3] = [
    setup(
        "Modernize Electron project structure",
        &[
            "Update to latest Electron version",
            "Set up TypeScript configuration",
            "Configure Vite for fast builds",
            "Set up testing with Playwright",
            "Configure electron-builder for packaging",
        ],
    ),
    core_migration(
        "Migrate to modern patterns",
        &[
            "Convert vanilla JS to TypeScript",
            "Implement React or Vue for UI (optional)",
            "Use IPC for main-renderer communication",
            "Add security best practices",
            "Implement auto-updates",
        ],
    ),
    refinement(&[
        "Optimize bundle size",
        "Add crash reporting",
        "Documentation updates",
        "Cross-platform testing",
    ]),
];

static JAVASCRIPT: [PhaseSpec; 3] = [
    setup(
        "Prepare the new project structure and tooling",
        &[
            "Initialize new project with Vite + React + TypeScript",
            "Set up ESLint, Prettier, and testing framework",
            "Configure Tailwind CSS",
            "Set up CI/CD pipeline",
        ],
    ),
    core_migration(
        "Migrate critical functionality",
        &[
            "Identify and migrate core business logic",
            "Convert deprecated patterns to modern equivalents",
            "Implement new component architecture",
            "Add comprehensive tests",
        ],
    ),
    refinement(&[
        "Performance optimization",
        "Accessibility improvements",
        "Documentation updates",
        "Final testing and deployment",
    ]),
];

fn catalog(ecosystem: Ecosystem) -> &'static [PhaseSpec; 3] {
    match ecosystem {
        Ecosystem::Swift => &SWIFT,
        Ecosystem::Python => &PYTHON,
        Ecosystem::Kotlin => &KOTLIN,
        Ecosystem::Java => &JAVA,
        Ecosystem::Go => &GO,
        Ecosystem::Rust => &RUST,
        Ecosystem::Ruby => &RUBY,
        Ecosystem::CSharp => &CSHARP,
        Ecosystem::Php => &PHP,
        Ecosystem::Electron => &ELECTRON,
        Ecosystem::JavaScript => &JAVASCRIPT,
    }
}

/// Phased plan for an ecosystem, numbered from 1.
pub fn phases(ecosystem: Ecosystem) -> Vec<MigrationPhase> {
    catalog(ecosystem)
        .iter()
        .zip(1u32..)
        .map(|(entry, phase)| MigrationPhase {
            phase,
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            tasks: entry.tasks.iter().map(|t| t.to_string()).collect(),
            priority: entry.priority,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ecosystem; 11] = [
        Ecosystem::Swift,
        Ecosystem::Python,
        Ecosystem::Kotlin,
        Ecosystem::Java,
        Ecosystem::Go,
        Ecosystem::Rust,
        Ecosystem::Ruby,
        Ecosystem::CSharp,
        Ecosystem::Php,
        Ecosystem::Electron,
        Ecosystem::JavaScript,
    ];

    #[test]
    fn test_catalog_shape() {
        for ecosystem in ALL {
            let plan = phases(ecosystem);
            assert_eq!(plan.len(), 3, "{}", ecosystem);
            assert_eq!(
                plan.iter().map(|p| p.phase).collect::<Vec<_>>(),
                vec![1, 2, 3]
            );
            assert_eq!(plan[0].title, "Setup & Planning");
            assert_eq!(plan[1].title, "Core Migration");
            assert_eq!(plan[2].title, "Refinement");
            assert_eq!(
                plan.iter().map(|p| p.priority).collect::<Vec<_>>(),
                vec![Priority::High, Priority::High, Priority::Medium]
            );
            assert!(plan.iter().all(|p| !p.tasks.is_empty()));
        }
    }

    #[test]
    fn test_java_plan() {
        let plan = phases(Ecosystem::Java);
        assert_eq!(plan[0].description, "Modernize Java environment and tooling");
        assert_eq!(plan[0].tasks[0], "Update to Java 21 LTS");
        assert_eq!(plan[1].tasks[3], "Migrate to virtual threads (Project Loom)");
    }

    #[test]
    fn test_plans_differ_per_ecosystem() {
        assert_ne!(phases(Ecosystem::Go)[0].tasks, phases(Ecosystem::Rust)[0].tasks);
        assert_eq!(phases(Ecosystem::JavaScript)[0].tasks.len(), 4);
    }
}
