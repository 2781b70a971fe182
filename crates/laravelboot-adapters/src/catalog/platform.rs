//! Platform tier: Spatie packages and search.

use laravelboot_core::application::StepRef;
use laravelboot_core::domain::{CommandSpec, TextPatch};

use super::{AUTHENTICATABLE_IMPORT, USER_MODEL, artisan, patch, require, step, try_run, write};

pub(super) fn features() -> Vec<(&'static str, Vec<StepRef>)> {
    vec![
        ("roles", vec![roles()]),
        ("media", vec![media()]),
        ("activity-log", vec![activity_log()]),
        ("search", vec![search()]),
    ]
}

fn roles() -> StepRef {
    step(
        "roles",
        [
            require(&["spatie/laravel-permission"]),
            artisan(&[
                "vendor:publish",
                "--provider=Spatie\\Permission\\PermissionServiceProvider",
            ]),
            patch(USER_MODEL, has_roles()),
        ],
    )
}

pub(super) fn has_roles() -> TextPatch {
    TextPatch::new("Spatie\\Permission\\Traits\\HasRoles")
        .insert_after(
            AUTHENTICATABLE_IMPORT,
            "\nuse Spatie\\Permission\\Traits\\HasRoles;",
        )
        .replace_first("HasFactory, Notifiable;", "HasFactory, Notifiable, HasRoles;")
}

fn media() -> StepRef {
    let publish = |tag: &str| {
        try_run(CommandSpec::artisan([
            "vendor:publish".to_string(),
            "--provider=Spatie\\MediaLibrary\\MediaLibraryServiceProvider".to_string(),
            format!("--tag={tag}"),
        ]))
    };
    step(
        "media",
        [
            require(&["spatie/laravel-medialibrary", "--with-all-dependencies"]),
            publish("medialibrary-migrations"),
            publish("medialibrary-config"),
            write(
                "app/Services/SpatieMediaService.php",
                include_str!("../../stubs/platform/SpatieMediaService.php"),
            ),
            write(
                "app/Traits/HasMedia.php",
                include_str!("../../stubs/platform/HasMedia.php"),
            ),
        ],
    )
}

fn activity_log() -> StepRef {
    step(
        "activity-log",
        [
            require(&["spatie/laravel-activitylog", "--with-all-dependencies"]),
            artisan(&[
                "vendor:publish",
                "--provider=Spatie\\Activitylog\\ActivitylogServiceProvider",
                "--tag=activitylog-migrations",
            ]),
            write(
                "app/Support/Concerns/InteractsWithActivityLog.php",
                include_str!("../../stubs/platform/InteractsWithActivityLog.php"),
            ),
        ],
    )
}

fn search() -> StepRef {
    step(
        "search",
        [
            require(&["laravel/scout", "--with-all-dependencies"]),
            require(&[
                "typesense/typesense-php",
                "dev-it-me/laravel-scout-typesense-driver",
                "--with-all-dependencies",
            ]),
            artisan(&[
                "vendor:publish",
                "--provider=Laravel\\Scout\\ScoutServiceProvider",
            ]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use laravelboot_core::domain::PatchOutcome;

    use super::*;

    const USER: &str = include_str!("../../tests/fixtures/User.php");

    #[test]
    fn roles_patch_appends_trait_after_notifiable() {
        let PatchOutcome::Applied(patched) = has_roles().apply(USER).unwrap() else {
            panic!("expected the patch to apply");
        };
        assert!(patched.contains("    use HasFactory, Notifiable, HasRoles;"));
        assert!(patched.contains("\nuse Spatie\\Permission\\Traits\\HasRoles;"));
        assert!(patched.contains("    /** @use HasFactory<\\Database\\Factories\\UserFactory> */\n"));
        assert_eq!(has_roles().apply(&patched).unwrap(), PatchOutcome::AlreadyApplied);
    }

    #[test]
    fn roles_patch_needs_the_authenticatable_import() {
        assert!(has_roles().apply("<?php\nclass User {}\n").is_err());
    }
}
