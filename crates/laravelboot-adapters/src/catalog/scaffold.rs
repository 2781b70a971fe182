//! Base scaffolding applied to every freshly created project.

use laravelboot_core::application::StepRef;
use laravelboot_core::domain::{Action, CommandSpec, TextPatch};

use super::{mkdir, patch, require, step, try_run, write};

const PROVIDERS: &str = "bootstrap/providers.php";

pub(super) fn steps() -> Vec<StepRef> {
    vec![architecture(), api_responses(), query_builder()]
}

fn architecture() -> StepRef {
    step(
        "architecture",
        [
            "app/Domain",
            "app/Domain/Shared",
            "app/Domain/Users",
            "app/Domain/Users/Actions",
            "app/Domain/Users/Models",
            "app/Domain/Users/Resources",
            "app/Domain/Users/QueryBuilders",
        ]
        .map(mkdir),
    )
}

fn api_responses() -> StepRef {
    step(
        "api-responses",
        [
            write(
                "app/Providers/ApiResponseServiceProvider.php",
                include_str!("../../stubs/scaffold/ApiResponseServiceProvider.php"),
            ),
            patch(PROVIDERS, provider_registration()),
            Action::RequireFile {
                path: "bootstrap/app.php".into(),
            },
        ],
    )
}

/// Registers the response macros provider in `bootstrap/providers.php`.
fn provider_registration() -> TextPatch {
    TextPatch::new("ApiResponseServiceProvider::class").replace_first(
        "];",
        "    App\\Providers\\ApiResponseServiceProvider::class,\n];",
    )
}

fn query_builder() -> StepRef {
    step(
        "query-builder",
        [
            require(&["spatie/laravel-query-builder", "--with-all-dependencies"]),
            try_run(CommandSpec::artisan([
                "vendor:publish",
                "--provider=Spatie\\QueryBuilder\\QueryBuilderServiceProvider",
                "--tag=query-builder-config",
            ])),
            write(
                "app/Services/QueryBuilderService.php",
                include_str!("../../stubs/scaffold/QueryBuilderService.php"),
            ),
            write(
                "app/Domain/Users/QueryBuilders/UserQueryBuilder.php",
                include_str!("../../stubs/scaffold/UserQueryBuilder.php"),
            ),
        ],
    )
}
