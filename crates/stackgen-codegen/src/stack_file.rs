//! Generates the CDK stack stub, `src/<file_base>.ts`.
//!
//! The stub is a starting point for hand-written infrastructure, so it is
//! written once and never overwritten on later runs.

use stackgen_core::identity::ProjectIdentity;

use crate::writer::GeneratedFile;

/// Generate the content of the stack stub.
///
/// Templating is literal string substitution over the already-validated
/// identity; it cannot fail.
pub fn generate_stack_file(identity: &ProjectIdentity, stage_aware: bool) -> String {
    let class_name = &identity.class_name;
    let stage_field = if stage_aware { "\n  stage: string;" } else { "" };

    format!(
        r#"import * as cdk from 'aws-cdk-lib';
import {{ Construct }} from 'constructs';

export interface {class_name}Props extends cdk.StackProps {{
  serviceName: string;{stage_field}
}}

export class {class_name} extends cdk.Stack {{
  constructor(scope: Construct, id: string, props: {class_name}Props) {{
    super(scope, id, props);
    // Add your infra here...
  }}
}}
"#
    )
}

/// The stub as a sample file at its canonical path.
pub fn stack_file(identity: &ProjectIdentity, stage_aware: bool) -> GeneratedFile {
    GeneratedFile::sample(
        format!("src/{}.ts", identity.file_base),
        generate_stack_file(identity, stage_aware),
    )
}
