//! Enterprise tier: code quality, architecture helpers, docs, CI and
//! monitoring.

use laravelboot_core::application::StepRef;

use super::{artisan, require, step, write};

pub(super) fn features() -> Vec<(&'static str, Vec<StepRef>)> {
    vec![
        ("quality", vec![quality()]),
        ("pro-arch", vec![pro_arch()]),
        ("docs-pro", vec![docs_pro()]),
        ("ci", vec![ci()]),
        ("monitoring", vec![monitoring()]),
    ]
}

fn quality() -> StepRef {
    step(
        "quality",
        [
            require(&["--dev", "laravel/pint"]),
            require(&["--dev", "phpstan/phpstan", "nunomaduro/larastan"]),
            write(
                "phpstan.neon",
                include_str!("../../stubs/enterprise/phpstan.neon"),
            ),
            require(&["--dev", "pestphp/pest", "pestphp/pest-plugin-laravel"]),
            artisan(&["pest:install", "--no-interaction"]),
        ],
    )
}

fn pro_arch() -> StepRef {
    step(
        "pro-arch",
        [
            require(&["spatie/laravel-data", "--with-all-dependencies"]),
            write(
                "app/Support/Actions/AsAction.php",
                include_str!("../../stubs/enterprise/AsAction.php"),
            ),
        ],
    )
}

fn docs_pro() -> StepRef {
    step(
        "docs-pro",
        [require(&["dedoc/scramble", "--with-all-dependencies"])],
    )
}

fn ci() -> StepRef {
    step(
        "ci",
        [write(
            ".github/workflows/ci.yml",
            include_str!("../../stubs/enterprise/ci.yml"),
        )],
    )
}

fn monitoring() -> StepRef {
    step(
        "monitoring",
        [
            require(&["laravel/telescope", "--dev", "--with-all-dependencies"]),
            artisan(&["telescope:install"]),
            require(&["laravel/pulse", "--with-all-dependencies"]),
            artisan(&[
                "vendor:publish",
                "--provider=Laravel\\Pulse\\PulseServiceProvider",
            ]),
        ],
    )
}
