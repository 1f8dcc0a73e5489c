//! Deterministic narrative templates used when no backend answers.

/// A canned migration paragraph and the keywords that select it.
struct Template {
    /// Any of these in the current stack
    current: &'static [&'static str],
    /// Any of these in the proposed stack, empty means always
    proposed: &'static [&'static str],
    /// Words removed from the current stack before matching
    ignore: &'static [&'static str],
    body: &'static str,
}

impl Template {
    fn matches(&self, current: &str, proposed: &str) -> bool {
        let current = self
            .ignore
            .iter()
            .fold(current.to_string(), |text, word| text.replace(word, " "));
        self.current.iter().any(|k| current.contains(k))
            && (self.proposed.is_empty() || self.proposed.iter().any(|k| proposed.contains(k)))
    }
}

const TEMPLATES: &[Template] = &[
    Template {
        current: &["jquery"],
        proposed: &["react"],
        ignore: &[],
        body: "**jQuery to React**\n\
1. Inventory every `$(...)` selector and event binding per page.\n\
2. Mount React roots inside the existing pages, one widget at a time.\n\
3. Move DOM state into component state and props.\n\
4. Replace `$.ajax` calls with `fetch` wrapped in hooks.\n\
5. Remove jQuery once no page imports it.",
    },
    Template {
        current: &["javascript", "var"],
        proposed: &["typescript"],
        ignore: &[],
        body: "**JavaScript to TypeScript**\n\
1. Add a `tsconfig.json` with `allowJs` so both languages build together.\n\
2. Replace `var` with `const` and `let` file by file.\n\
3. Rename leaf modules to `.ts` first and type their exports.\n\
4. Turn on `strict` once the remaining `any` types are gone.",
    },
    Template {
        current: &["gulp", "grunt"],
        proposed: &["vite"],
        ignore: &[],
        body: "**Task runner to Vite**\n\
1. List every gulp or grunt task and what it produces.\n\
2. Map bundling, minification and dev serving to the Vite defaults.\n\
3. Move the remaining tasks into `package.json` scripts.\n\
4. Delete the task runner configuration once CI builds with Vite.",
    },
    Template {
        current: &["moment"],
        proposed: &[],
        ignore: &[],
        body: "**moment to date-fns**\n\
1. Find every `moment()` call and the formats it uses.\n\
2. Replace parsing and formatting with the matching date-fns functions.\n\
3. Use native `Intl` APIs for locale-aware display.\n\
4. Drop moment and its locale bundles from the build.",
    },
    Template {
        current: &["flask"],
        proposed: &["fastapi"],
        ignore: &[],
        body: "**Flask to FastAPI**\n\
1. Describe request and response bodies as Pydantic models.\n\
2. Port blueprints to routers, keeping URL paths unchanged.\n\
3. Convert I/O-bound handlers to `async def`.\n\
4. Serve both apps behind one proxy until every route has moved.",
    },
    Template {
        current: &["django"],
        proposed: &["django"],
        ignore: &[],
        body: "**Django upgrade**\n\
1. Upgrade one LTS release at a time and run the test suite at each step.\n\
2. Fix deprecation warnings before moving to the next release.\n\
3. Replace removed third-party apps with maintained equivalents.\n\
4. Expose APIs through Django REST Framework serializers.",
    },
    Template {
        current: &["express", "node"],
        proposed: &["node.js", "express"],
        ignore: &[],
        body: "**Node.js and Express upgrade**\n\
1. Move to the current LTS Node.js release.\n\
2. Replace callback-style handlers with `async` functions and central error middleware.\n\
3. Add TypeScript types for request and response payloads.\n\
4. Put database access behind Prisma models.",
    },
    Template {
        current: &["java"],
        proposed: &["spring boot"],
        ignore: &["javascript"],
        body: "**Java to Spring Boot**\n\
1. Upgrade the build to Java 21 with Maven or Gradle.\n\
2. Wrap existing services as Spring beans without changing behavior.\n\
3. Replace hand-written servlets with `@RestController` endpoints.\n\
4. Move configuration to `application.yml` and profiles.",
    },
];

/// Six-step incremental plan used when no specific template applies.
pub const GENERIC_GUIDE: &str = "> **Approach:** Incremental Migration (Strangler Fig Pattern)\n\
>\n\
> Replace the old system piece by piece so every step can be tested and rolled back on its own.\n\
\n\
1. Put the existing application behind a routing layer.\n\
2. Set up the new stack with CI, linting and tests.\n\
3. Start with one low-risk, non-critical feature.\n\
4. Move features across one at a time, testing each before switching traffic.\n\
5. Watch errors and performance after every switch.\n\
6. Retire old code once nothing routes to it.";

/// Architecture summary used when no backend answers.
pub const GENERIC_SUMMARY: &str = "Recommend migrating to: React + TypeScript + Vite for frontend, \
Node.js + Express + TypeScript for backend. Use modern patterns like hooks, async/await, \
and proper error handling.";

/// Build a migration guide from keyword matches.
///
/// Matching is case-insensitive substring search over the joined lists.
/// Never fails and does no I/O.
pub fn migration_guide(current: &[String], proposed: &[String]) -> String {
    let current_text = current.join(" ").to_lowercase();
    let proposed_text = proposed.join(" ").to_lowercase();

    let sections: Vec<&str> = TEMPLATES
        .iter()
        .filter(|t| t.matches(&current_text, &proposed_text))
        .map(|t| t.body)
        .collect();

    let mut guide = format!(
        "## Migration Guide\n\n**From:** {}\n**To:** {}\n\n",
        display_list(current),
        display_list(proposed)
    );
    if sections.is_empty() {
        guide.push_str(GENERIC_GUIDE);
    } else {
        guide.push_str(&sections.join("\n\n"));
    }
    guide
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none detected)".to_string()
    } else {
        items.join(", ")
    }
}
