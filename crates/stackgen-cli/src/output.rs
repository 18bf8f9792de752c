//! Terminal output formatting.

use colored::Colorize;
use std::path::{Path, PathBuf};

use stackgen_codegen::compose::ComposedProject;
use stackgen_core::options::PackageManager;

/// Print the files a scaffold run would create, without creating them.
pub fn print_scaffold_plan(project: &ComposedProject, target_dir: &Path) {
    println!(
        "{} Would scaffold {} into {}:",
        "→".blue().bold(),
        project.identity.raw_name.cyan(),
        target_dir.display()
    );
    print_file_list(project);
}

/// Print the files a regeneration run would rewrite.
pub fn print_regenerate_plan(project: &ComposedProject) {
    println!(
        "{} Would regenerate {} files for {}:",
        "→".blue().bold(),
        project.files.len(),
        project.identity.raw_name.cyan()
    );
    print_file_list(project);
}

/// Print the scaffold banner shown before files are written.
pub fn print_scaffolding(project: &ComposedProject) {
    println!(
        "{} Scaffolding project: {}",
        "→".blue().bold(),
        project.identity.raw_name.cyan()
    );
}

/// Print the paths a write pass actually touched.
pub fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("  {} {}", "✓".green(), path.display());
    }
}

/// Print the post-scaffold summary with suggested next steps.
pub fn print_created(project: &ComposedProject, target_dir: &Path) {
    println!();
    println!(
        "{} Project created: {} ({})",
        "✓".green().bold(),
        project.identity.raw_name.cyan(),
        project.identity.class_name
    );
    println!("  Directory: {}", target_dir.display());
    println!();
    println!("{}", "Next steps:".bold());
    for step in next_steps(project.options.package_manager, target_dir) {
        println!("  {step}");
    }
}

/// Print the regeneration summary.
pub fn print_regenerated(project: &ComposedProject, written: usize) {
    println!();
    println!(
        "{} Regenerated {} file(s) for {} (existing sample files left untouched)",
        "✓".green().bold(),
        written,
        project.identity.raw_name.cyan()
    );
}

fn print_file_list(project: &ComposedProject) {
    for file in &project.files {
        println!("  {}", file.path.display());
    }
}

/// Shell commands to run after scaffolding, in order.
fn next_steps(package_manager: PackageManager, target_dir: &Path) -> Vec<String> {
    vec![
        format!("cd {}", target_dir.display()),
        format!("{package_manager} install"),
        package_manager.run_script("deploy", "-c stage=dev"),
    ]
}
