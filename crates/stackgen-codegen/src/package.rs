//! Generates `package.json` and `cdk.json` for the scaffolded app.

use anyhow::Result;
use serde_json::json;
use stackgen_core::identity::ProjectIdentity;
use stackgen_core::options::ResolvedOptions;

use crate::writer::GeneratedFile;

pub const PACKAGE_JSON_PATH: &str = "package.json";
pub const CDK_JSON_PATH: &str = "cdk.json";

/// Development dependencies every generated project gets.
const BASE_DEV_DEPS: &[(&str, &str)] = &[
    ("typescript", "^5"),
    ("ts-node", "^10"),
    ("jest", "^29"),
    ("ts-jest", "^29"),
    ("@types/jest", "^29"),
    ("@types/node", "^20"),
];

/// Scripts registered on every generated project, including the
/// watch-mode deploy loop and the e2e runner aliases.
fn scripts() -> serde_json::Value {
    json!({
        "synth": "cdk synth",
        "deploy": "cdk deploy",
        "deploy:watch": "cdk watch",
        "destroy": "cdk destroy",
        "bootstrap": "cdk bootstrap",
        "test": "jest --selectProjects unit integration",
        "test:e2e": "jest --selectProjects e2e",
    })
}

/// Split a dependency spec like `name@^1.2` into name and version range.
/// A bare name resolves to any version.
fn split_dep(spec: &str) -> (String, String) {
    match spec.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() => (name.to_string(), version.to_string()),
        _ => (spec.to_string(), "*".to_string()),
    }
}

/// Generate `package.json`: pinned CDK dependency set merged with
/// caller-supplied deps.
pub fn generate_package_json(
    identity: &ProjectIdentity,
    options: &ResolvedOptions,
) -> Result<String> {
    let mut dependencies = serde_json::Map::new();
    dependencies.insert("aws-cdk-lib".into(), json!(options.cdk_version));
    dependencies.insert("constructs".into(), json!("^10.0.0"));
    for spec in &options.deps {
        let (name, version) = split_dep(spec);
        dependencies.insert(name, json!(version));
    }

    let mut dev_dependencies = serde_json::Map::new();
    dev_dependencies.insert("aws-cdk".into(), json!(options.cdk_version));
    for (name, version) in BASE_DEV_DEPS {
        dev_dependencies.insert((*name).into(), json!(version));
    }
    for spec in &options.dev_deps {
        let (name, version) = split_dep(spec);
        dev_dependencies.insert(name, json!(version));
    }

    let package = json!({
        "name": identity.raw_name,
        "version": "0.1.0",
        "private": true,
        "scripts": scripts(),
        "dependencies": dependencies,
        "devDependencies": dev_dependencies,
    });
    Ok(serde_json::to_string_pretty(&package)? + "\n")
}

/// Generate `cdk.json`: the app command plus the context map (already
/// seeded with the service name by the composer).
pub fn generate_cdk_json(options: &ResolvedOptions) -> Result<String> {
    let context: serde_json::Map<String, serde_json::Value> = options
        .context
        .iter()
        .map(|(k, v)| (k.clone(), json!(v)))
        .collect();
    let config = json!({
        "app": "npx ts-node --prefer-ts-exts src/main.ts",
        "context": context,
    });
    Ok(serde_json::to_string_pretty(&config)? + "\n")
}

pub fn package_json_file(
    identity: &ProjectIdentity,
    options: &ResolvedOptions,
) -> Result<GeneratedFile> {
    Ok(GeneratedFile::managed(
        PACKAGE_JSON_PATH,
        generate_package_json(identity, options)?,
    ))
}

pub fn cdk_json_file(options: &ResolvedOptions) -> Result<GeneratedFile> {
    Ok(GeneratedFile::managed(
        CDK_JSON_PATH,
        generate_cdk_json(options)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackgen_core::options::{resolve, ScaffoldOptions};

    fn identity() -> ProjectIdentity {
        ProjectIdentity::from_raw("projalf").unwrap()
    }

    fn options(explicit: ScaffoldOptions) -> ResolvedOptions {
        resolve(explicit, ScaffoldOptions::default())
    }

    #[test]
    fn test_cdk_version_is_pinned() {
        let content = generate_package_json(&identity(), &options(Default::default())).unwrap();
        let package: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(package["dependencies"]["aws-cdk-lib"], "2.156.0");
        assert_eq!(package["devDependencies"]["aws-cdk"], "2.156.0");
        assert_eq!(package["name"], "projalf");
    }

    #[test]
    fn test_task_aliases_are_registered() {
        let content = generate_package_json(&identity(), &options(Default::default())).unwrap();
        let package: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(package["scripts"]["deploy:watch"], "cdk watch");
        assert_eq!(package["scripts"]["test:e2e"], "jest --selectProjects e2e");
        assert_eq!(package["scripts"]["destroy"], "cdk destroy");
    }

    #[test]
    fn test_caller_deps_are_merged() {
        let content = generate_package_json(
            &identity(),
            &options(ScaffoldOptions {
                deps: Some(vec!["@aws-sdk/client-s3@^3".into(), "zod".into()]),
                ..Default::default()
            }),
        )
        .unwrap();
        let package: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(package["dependencies"]["@aws-sdk/client-s3"], "^3");
        assert_eq!(package["dependencies"]["zod"], "*");
    }

    #[test]
    fn test_split_dep_handles_scoped_names() {
        assert_eq!(
            split_dep("@types/node@^20"),
            ("@types/node".to_string(), "^20".to_string())
        );
        assert_eq!(
            split_dep("@scope/pkg"),
            ("@scope/pkg".to_string(), "*".to_string())
        );
        assert_eq!(split_dep("zod@3.22.0"), ("zod".to_string(), "3.22.0".to_string()));
    }

    #[test]
    fn test_cdk_json_carries_context() {
        let mut explicit = ScaffoldOptions::default();
        explicit.context = Some([("serviceName".to_string(), "projalf".to_string())].into());
        let content = generate_cdk_json(&options(explicit)).unwrap();
        let config: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(config["app"], "npx ts-node --prefer-ts-exts src/main.ts");
        assert_eq!(config["context"]["serviceName"], "projalf");
    }
}
