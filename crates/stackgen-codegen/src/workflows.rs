//! CI/CD workflow construction.
//!
//! Builds the declarative job graph from a fixed job template plus
//! per-job overrides and renders it to `.github/workflows/ci-cd.yml`.
//! Two graph shapes exist: the staged-test graph gates both deploys on an
//! ephemeral e2e run, the direct-deploy graph skips the test stage.

use anyhow::Result;
use stackgen_core::identity::pascal_case;
use stackgen_core::options::{PackageManager, ResolvedOptions, WorkflowStyle};
use stackgen_core::workflow::{
    guards, Job, OrderedMap, Permissions, PullRequestTrigger, PushTrigger, Step, Triggers,
    Workflow, STAGE_ID_MAX, STAGE_ID_MIN, STAGE_ID_PREFIX,
};
use stackgen_core::StackgenResult;

use crate::writer::GeneratedFile;

pub const WORKFLOW_PATH: &str = ".github/workflows/ci-cd.yml";

const WORKFLOW_NAME: &str = "ci-cd";
const RUNNER: &str = "ubuntu-latest";
const NODE_VERSION: &str = "20";

/// Region expression shared by every job; a repository secret with a
/// fixed fallback region.
const REGION_EXPR: &str = "${{ secrets.AWS_REGION || 'eu-central-1' }}";

/// Step prefix shared by every job: checkout, runtime, dependencies,
/// cloud credentials. Defined once, prepended everywhere.
fn common_steps(package_manager: PackageManager) -> Vec<Step> {
    vec![
        Step::uses("Checkout", "actions/checkout@v4"),
        Step::uses("Setup Node.js", "actions/setup-node@v4").with("node-version", NODE_VERSION),
        Step::run("Install dependencies", package_manager.ci_install_command()),
        Step::uses(
            "Configure AWS credentials",
            "aws-actions/configure-aws-credentials@v4",
        )
        .with("aws-access-key-id", "${{ secrets.AWS_ACCESS_KEY_ID }}")
        .with(
            "aws-secret-access-key",
            "${{ secrets.AWS_SECRET_ACCESS_KEY }}",
        )
        .with("aws-region", REGION_EXPR),
    ]
}

/// Assemble a job from the shared prefix plus job-specific steps.
fn job(
    package_manager: PackageManager,
    needs: Vec<String>,
    condition: Option<String>,
    specific_steps: Vec<Step>,
) -> Job {
    let mut steps = common_steps(package_manager);
    steps.extend(specific_steps);
    Job {
        runs_on: vec![RUNNER.to_string()],
        permissions: Permissions::cloud_auth(),
        needs,
        condition,
        steps,
    }
}

/// The `test` job: deploy an ephemeral stage, run e2e tests against it,
/// tear it down unconditionally.
fn test_job(package_manager: PackageManager) -> Job {
    let stage_ref = "${{ steps.stage.outputs.STAGE_ID }}";

    job(
        package_manager,
        vec![],
        None,
        vec![
            Step::run(
                "Generate random stage ID",
                format!(
                    "echo \"STAGE_ID={STAGE_ID_PREFIX}$(shuf -i {STAGE_ID_MIN}-{STAGE_ID_MAX} -n 1)\" >> $GITHUB_OUTPUT"
                ),
            )
            .id("stage"),
            Step::run(
                "Deploy Test Stack",
                package_manager.run_script(
                    "deploy",
                    &format!("-c stage={stage_ref} --require-approval never"),
                ),
            )
            .env("CDK_DEPLOY_ACCOUNT", "${{ secrets.AWS_TEST_ACCOUNT }}")
            .env("CDK_DEPLOY_REGION", REGION_EXPR),
            Step::run("Run E2E Tests", package_manager.run_script("test:e2e", ""))
                .env("STAGE", stage_ref),
            // Teardown must run even when deploy or tests failed.
            Step::run(
                "Destroy Test Stack",
                package_manager.run_script("destroy", &format!("-c stage={stage_ref} --force")),
            )
            .condition(guards::ALWAYS)
            .env("CDK_DEPLOY_ACCOUNT", "${{ secrets.AWS_TEST_ACCOUNT }}")
            .env("CDK_DEPLOY_REGION", REGION_EXPR),
        ],
    )
}

/// A deploy job for a fixed stage, pinned to its own account secret.
fn deploy_job(
    package_manager: PackageManager,
    stage: &str,
    account_secret: &str,
    needs: Vec<String>,
    condition: String,
    bootstrap: bool,
) -> Job {
    let account_expr = format!("${{{{ secrets.{account_secret} }}}}");

    let mut steps = Vec::new();
    if bootstrap {
        steps.push(
            Step::run(
                "Bootstrap environment",
                package_manager.run_script("bootstrap", ""),
            )
            .env("CDK_DEPLOY_ACCOUNT", account_expr.clone())
            .env("CDK_DEPLOY_REGION", REGION_EXPR),
        );
    }
    steps.push(
        Step::run(
            format!("Deploy {}", pascal_case(stage)),
            package_manager.run_script(
                "deploy",
                &format!("-c stage={stage} --require-approval never"),
            ),
        )
        .env("CDK_DEPLOY_ACCOUNT", account_expr)
        .env("CDK_DEPLOY_REGION", REGION_EXPR),
    );

    job(package_manager, needs, Some(condition), steps)
}

/// Build the job graph for the selected workflow style.
///
/// `deploy_dev` runs only for pull requests, `deploy_prod` only for
/// pushes to the release branch; the guards are mutually exclusive under
/// any single triggering event.
pub fn build_workflow(options: &ResolvedOptions) -> StackgenResult<Workflow> {
    let pm = options.package_manager;
    let on_push = guards::on_push_to(&options.default_branch);

    let jobs: OrderedMap<Job> = match options.workflow_style {
        WorkflowStyle::StagedTest => [
            ("test", test_job(pm)),
            (
                "deploy_dev",
                deploy_job(
                    pm,
                    "dev",
                    "AWS_DEV_ACCOUNT",
                    vec!["test".to_string()],
                    guards::ON_PULL_REQUEST.to_string(),
                    false,
                ),
            ),
            (
                "deploy_prod",
                deploy_job(
                    pm,
                    "prod",
                    "AWS_PROD_ACCOUNT",
                    vec!["test".to_string()],
                    on_push,
                    false,
                ),
            ),
        ]
        .into_iter()
        .collect(),
        WorkflowStyle::DirectDeploy => [
            (
                "deploy_dev",
                deploy_job(
                    pm,
                    "dev",
                    "AWS_DEV_ACCOUNT",
                    vec![],
                    guards::ON_PULL_REQUEST.to_string(),
                    true,
                ),
            ),
            (
                "deploy_prod",
                deploy_job(pm, "prod", "AWS_PROD_ACCOUNT", vec![], on_push, true),
            ),
        ]
        .into_iter()
        .collect(),
    };

    let workflow = Workflow {
        name: WORKFLOW_NAME.to_string(),
        on: Triggers {
            pull_request: Some(PullRequestTrigger::default()),
            push: Some(PushTrigger {
                branches: vec![options.default_branch.clone()],
            }),
        },
        jobs,
    };
    workflow.validate()?;
    Ok(workflow)
}

/// Render a workflow to YAML with the managed-file header.
pub fn render_workflow(workflow: &Workflow) -> Result<String> {
    let yaml = serde_yaml::to_string(workflow)?;
    Ok(format!(
        "# Generated by stackgen. Do not edit by hand.\n{yaml}"
    ))
}

/// The workflow as a managed file at its canonical path.
pub fn workflow_file(options: &ResolvedOptions) -> Result<GeneratedFile> {
    let workflow = build_workflow(options)?;
    tracing::debug!(
        jobs = workflow.jobs.len(),
        style = ?options.workflow_style,
        "built workflow job graph"
    );
    Ok(GeneratedFile::managed(
        WORKFLOW_PATH,
        render_workflow(&workflow)?,
    ))
}
