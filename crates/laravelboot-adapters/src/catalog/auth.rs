//! API authentication, one step list per driver.

use laravelboot_core::application::StepRef;
use laravelboot_core::domain::{AuthKind, TextPatch};

use super::{
    API_ROUTES, AUTHENTICATABLE_IMPORT, USER_MODEL, artisan, patch, step, write,
};

pub(super) fn steps(kind: AuthKind) -> Vec<StepRef> {
    let install: &[&str] = match kind {
        AuthKind::Sanctum => &["install:api", "--no-interaction"],
        AuthKind::Passport => &["install:api", "--passport", "--no-interaction"],
    };

    vec![
        step("api-install", [artisan(install)]),
        step(
            "api-support",
            [
                write(
                    "app/Support/Api/ApiResponse.php",
                    include_str!("../../stubs/auth/ApiResponse.php"),
                ),
                write(
                    "app/Support/Query/AppliesQueryBuilder.php",
                    include_str!("../../stubs/auth/AppliesQueryBuilder.php"),
                ),
            ],
        ),
        step(
            "auth-scaffold",
            [
                write("app/Http/Controllers/Api/AuthController.php", controller(kind)),
                patch(
                    API_ROUTES,
                    TextPatch::new("AuthController::class").append(routes(kind)),
                ),
                patch(USER_MODEL, api_tokens(kind)),
            ],
        ),
        step("migrate", [artisan(&["migrate", "--force"])]),
    ]
}

fn controller(kind: AuthKind) -> &'static str {
    match kind {
        AuthKind::Sanctum => include_str!("../../stubs/auth/AuthController.sanctum.php"),
        AuthKind::Passport => include_str!("../../stubs/auth/AuthController.passport.php"),
    }
}

fn routes(kind: AuthKind) -> &'static str {
    match kind {
        AuthKind::Sanctum => include_str!("../../stubs/auth/routes.sanctum.php"),
        AuthKind::Passport => include_str!("../../stubs/auth/routes.passport.php"),
    }
}

/// Start of the model's trait line. Indented so the `@use HasFactory<...>`
/// doc comment above it never matches.
const TRAIT_LINE: &str = "    use HasFactory";

/// Adds the driver's `HasApiTokens` trait to the User model.
fn api_tokens(kind: AuthKind) -> TextPatch {
    let import = match kind {
        AuthKind::Sanctum => "Laravel\\Sanctum\\HasApiTokens",
        AuthKind::Passport => "Laravel\\Passport\\HasApiTokens",
    };
    TextPatch::new(import)
        .insert_after(AUTHENTICATABLE_IMPORT, format!("\nuse {import};"))
        .replace_first(TRAIT_LINE, "    use HasApiTokens, HasFactory")
}

#[cfg(test)]
mod tests {
    use laravelboot_core::domain::PatchOutcome;

    use super::super::platform::has_roles;
    use super::*;

    const USER: &str = include_str!("../../tests/fixtures/User.php");

    #[test]
    fn sanctum_tokens_patch_imports_and_uses_trait() {
        let PatchOutcome::Applied(patched) = api_tokens(AuthKind::Sanctum).apply(USER).unwrap()
        else {
            panic!("expected the patch to apply");
        };
        assert!(patched.contains(
            "use Illuminate\\Foundation\\Auth\\User as Authenticatable;\nuse Laravel\\Sanctum\\HasApiTokens;"
        ));
        assert!(patched.contains("    use HasApiTokens, HasFactory, Notifiable;"));
        assert!(patched.contains("    /** @use HasFactory<\\Database\\Factories\\UserFactory> */\n"));
        assert_eq!(
            api_tokens(AuthKind::Sanctum).apply(&patched).unwrap(),
            PatchOutcome::AlreadyApplied
        );
    }

    #[test]
    fn passport_uses_its_own_trait_and_install_flag() {
        let PatchOutcome::Applied(patched) = api_tokens(AuthKind::Passport).apply(USER).unwrap()
        else {
            panic!("expected the patch to apply");
        };
        assert!(patched.contains("use Laravel\\Passport\\HasApiTokens;"));
        assert!(routes(AuthKind::Passport).contains("auth:api"));
        assert!(routes(AuthKind::Sanctum).contains("auth:sanctum"));
    }

    #[test]
    fn tokens_and_roles_compose_in_either_order() {
        let apply = |patch: TextPatch, source: &str| match patch.apply(source).unwrap() {
            PatchOutcome::Applied(out) => out,
            PatchOutcome::AlreadyApplied => panic!("expected the patch to apply"),
        };
        let expected = "    use HasApiTokens, HasFactory, Notifiable, HasRoles;";

        let tokens_first = apply(
            has_roles(),
            &apply(api_tokens(AuthKind::Sanctum), USER),
        );
        let roles_first = apply(
            api_tokens(AuthKind::Sanctum),
            &apply(has_roles(), USER),
        );

        assert!(tokens_first.contains(expected), "{tokens_first}");
        assert!(roles_first.contains(expected), "{roles_first}");
    }
}
