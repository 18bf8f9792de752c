//! Lint and test-runner configuration artifacts.
//!
//! Fixed style layer applied to every generated project: double-quoted
//! strings, no statement terminators, trailing commas in multi-line
//! literals, and jest projections partitioning unit, integration and e2e
//! suites.

use anyhow::Result;
use serde_json::json;

use crate::writer::GeneratedFile;

pub const PRETTIER_PATH: &str = ".prettierrc.json";
pub const ESLINT_PATH: &str = ".eslintrc.json";
pub const JEST_PATH: &str = "jest.config.json";

/// Formatter settings enforced on generated projects.
pub fn generate_prettier_config() -> Result<String> {
    let config = json!({
        "semi": false,
        "printWidth": 100,
        "singleQuote": false,
        "trailingComma": "all",
    });
    Ok(serde_json::to_string_pretty(&config)? + "\n")
}

/// Stylistic lint rules matching the formatter settings.
pub fn generate_eslint_config() -> Result<String> {
    let config = json!({
        "rules": {
            "@stylistic/quotes": ["error", "double", { "avoidEscape": true }],
            "@stylistic/semi": ["error", "never"],
            "@stylistic/comma-dangle": ["error", "always-multiline"],
        }
    });
    Ok(serde_json::to_string_pretty(&config)? + "\n")
}

/// Test-runner projections. Each suite gets its own glob so CI can select
/// them independently (`test` runs unit + integration, `test:e2e` the e2e
/// project).
pub fn generate_jest_config() -> Result<String> {
    let project = |name: &str| {
        json!({
            "displayName": name,
            "preset": "ts-jest",
            "testMatch": [format!("<rootDir>/test/{name}/**/*.test.ts")],
        })
    };
    let config = json!({
        "projects": [project("unit"), project("integration"), project("e2e")],
    });
    Ok(serde_json::to_string_pretty(&config)? + "\n")
}

pub fn prettier_file() -> Result<GeneratedFile> {
    Ok(GeneratedFile::managed(
        PRETTIER_PATH,
        generate_prettier_config()?,
    ))
}

pub fn eslint_file() -> Result<GeneratedFile> {
    Ok(GeneratedFile::managed(ESLINT_PATH, generate_eslint_config()?))
}

pub fn jest_file() -> Result<GeneratedFile> {
    Ok(GeneratedFile::managed(JEST_PATH, generate_jest_config()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prettier_settings() {
        let content = generate_prettier_config().unwrap();
        let config: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(config["semi"], false);
        assert_eq!(config["printWidth"], 100);
        assert_eq!(config["singleQuote"], false);
        assert_eq!(config["trailingComma"], "all");
    }

    #[test]
    fn test_eslint_rules() {
        let content = generate_eslint_config().unwrap();
        let config: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(config["rules"]["@stylistic/quotes"][1], "double");
        assert_eq!(config["rules"]["@stylistic/semi"][1], "never");
        assert_eq!(
            config["rules"]["@stylistic/comma-dangle"][1],
            "always-multiline"
        );
    }

    #[test]
    fn test_jest_projections_partition_suites() {
        let content = generate_jest_config().unwrap();
        let config: serde_json::Value = serde_json::from_str(&content).unwrap();
        let projects = config["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 3);
        let globs: Vec<&str> = projects
            .iter()
            .map(|p| p["testMatch"][0].as_str().unwrap())
            .collect();
        assert!(globs.contains(&"<rootDir>/test/unit/**/*.test.ts"));
        assert!(globs.contains(&"<rootDir>/test/integration/**/*.test.ts"));
        assert!(globs.contains(&"<rootDir>/test/e2e/**/*.test.ts"));
    }
}
