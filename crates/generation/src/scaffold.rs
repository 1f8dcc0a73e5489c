//! Starter project skeleton for a proposal.

use std::collections::BTreeMap;

use refactorium_core::{ArchitectureProposal, Ecosystem};
use serde_json::json;
use thiserror::Error;

/// Scaffold errors
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// No skeleton exists for the proposal's ecosystem
    #[error("No scaffold template for the {0} ecosystem")]
    UnsupportedEcosystem(Ecosystem),

    /// Template serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scaffold operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// File path to file content.
pub type Scaffold = BTreeMap<String, String>;

const VITE_CONFIG: &str = "import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
";

const APP_COMPONENT: &str = "function App() {
  return (
    <div className=\"app\">
      <h1>Welcome to Your Modernized App</h1>
    </div>
  );
}

export default App;
";

const MAIN_FILE: &str = "import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
";

/// Generate the React/TypeScript/Vite skeleton.
///
/// Only the JavaScript and Electron ecosystems have a matching skeleton.
pub fn generate(proposal: &ArchitectureProposal) -> Result<Scaffold> {
    match proposal.ecosystem {
        Ecosystem::JavaScript | Ecosystem::Electron => {}
        other => return Err(ScaffoldError::UnsupportedEcosystem(other)),
    }

    let mut files = Scaffold::new();
    files.insert("package.json".to_string(), package_json(proposal)?);
    files.insert("tsconfig.json".to_string(), tsconfig()?);
    files.insert("vite.config.ts".to_string(), VITE_CONFIG.to_string());
    files.insert("src/App.tsx".to_string(), APP_COMPONENT.to_string());
    files.insert("src/main.tsx".to_string(), MAIN_FILE.to_string());
    Ok(files)
}

fn package_json(proposal: &ArchitectureProposal) -> Result<String> {
    let mentions = |needle: &str| {
        proposal
            .proposed_stack
            .iter()
            .any(|label| label.to_lowercase().contains(needle))
    };

    let mut manifest = json!({
        "name": "modernized-app",
        "version": "1.0.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "tsc && vite build",
            "preview": "vite preview",
        },
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
        },
        "devDependencies": {
            "@types/react": "^18.2.0",
            "@types/react-dom": "^18.2.0",
            "@vitejs/plugin-react": "^4.2.0",
            "typescript": "^5.3.0",
            "vite": "^5.0.0",
        },
    });

    if let Some(dev) = manifest["devDependencies"].as_object_mut() {
        if mentions("tailwind") {
            dev.insert("tailwindcss".to_string(), json!("^3.4.0"));
        }
        if proposal.ecosystem == Ecosystem::Electron {
            dev.insert("electron".to_string(), json!("^30.0.0"));
        }
    }

    Ok(serde_json::to_string_pretty(&manifest)?)
}

fn tsconfig() -> Result<String> {
    let config = json!({
        "compilerOptions": {
            "target": "ES2020",
            "useDefineForClassFields": true,
            "lib": ["ES2020", "DOM", "DOM.Iterable"],
            "module": "ESNext",
            "skipLibCheck": true,
            "moduleResolution": "bundler",
            "strict": true,
            "jsx": "react-jsx",
        },
    });
    Ok(serde_json::to_string_pretty(&config)?)
}
