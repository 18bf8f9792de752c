//! Generates the CDK app entry point, `src/main.ts`.
//!
//! Managed file: always replaced on regeneration so the current template
//! fully supersedes whatever was there before.

use stackgen_core::identity::ProjectIdentity;
use stackgen_core::options::{ResolvedOptions, ServiceNameSource};

use crate::writer::GeneratedFile;

pub const ENTRYPOINT_PATH: &str = "src/main.ts";

/// Generate the content of the entry point.
///
/// Deployment account and region come from `CDK_DEPLOY_*` with the
/// default-context `CDK_DEFAULT_*` pair as fallback. The service name is
/// resolved per the selected strategy; with stage-awareness on, the stage
/// comes from CDK context (the workflow passes `-c stage=...`) and
/// suffixes the stack id so stages never collide on stack names.
pub fn generate_entrypoint(identity: &ProjectIdentity, options: &ResolvedOptions) -> String {
    let class_name = &identity.class_name;
    let file_base = &identity.file_base;

    let service_name = match options.service_name_source {
        ServiceNameSource::Literal => format!("'{}'", identity.raw_name),
        ServiceNameSource::ContextLookup => format!(
            "app.node.tryGetContext('serviceName') ?? '{}'",
            identity.raw_name
        ),
    };

    if options.stage_aware {
        format!(
            r#"import * as cdk from 'aws-cdk-lib';
import {{ {class_name} }} from './{file_base}';

const env = {{
  account: process.env.CDK_DEPLOY_ACCOUNT ?? process.env.CDK_DEFAULT_ACCOUNT,
  region: process.env.CDK_DEPLOY_REGION ?? process.env.CDK_DEFAULT_REGION,
}};

const app = new cdk.App();
const serviceName = {service_name};
const stage = app.node.tryGetContext('stage') ?? 'dev';
new {class_name}(app, `${{serviceName}}-${{stage}}`, {{ env, serviceName, stage }});
app.synth();
"#
        )
    } else {
        format!(
            r#"import * as cdk from 'aws-cdk-lib';
import {{ {class_name} }} from './{file_base}';

const env = {{
  account: process.env.CDK_DEPLOY_ACCOUNT ?? process.env.CDK_DEFAULT_ACCOUNT,
  region: process.env.CDK_DEPLOY_REGION ?? process.env.CDK_DEFAULT_REGION,
}};

const app = new cdk.App();
const serviceName = {service_name};
new {class_name}(app, serviceName, {{ env, serviceName }});
app.synth();
"#
        )
    }
}

/// The entry point as a managed file at its canonical path.
pub fn entrypoint(identity: &ProjectIdentity, options: &ResolvedOptions) -> GeneratedFile {
    GeneratedFile::managed(ENTRYPOINT_PATH, generate_entrypoint(identity, options))
}
