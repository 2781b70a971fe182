//! Infrastructure tier: containers, middleware, throttling and health.

use laravelboot_core::application::StepRef;
use laravelboot_core::domain::{Action, CommandSpec, TextPatch};

use super::{API_ROUTES, mkdir, patch, step, write};

pub(super) fn features() -> Vec<(&'static str, Vec<StepRef>)> {
    vec![
        ("docker", vec![docker()]),
        ("security", vec![security()]),
        ("rate-limit", vec![rate_limit()]),
        ("health", vec![health()]),
    ]
}

fn docker() -> StepRef {
    step(
        "docker",
        [
            mkdir("docker"),
            write("docker/Dockerfile", include_str!("../../stubs/infra/Dockerfile")),
            write(
                "docker/Dockerfile.prod",
                include_str!("../../stubs/infra/Dockerfile.prod"),
            ),
            write(
                "docker-compose.yml",
                include_str!("../../stubs/infra/docker-compose.yml"),
            ),
        ],
    )
}

fn security() -> StepRef {
    step(
        "security",
        [
            write(
                "app/Http/Middleware/ForceJsonResponse.php",
                include_str!("../../stubs/infra/ForceJsonResponse.php"),
            ),
            write(
                "app/Support/Env/EnvValidator.php",
                include_str!("../../stubs/infra/EnvValidator.php"),
            ),
        ],
    )
}

fn rate_limit() -> StepRef {
    step(
        "rate-limit",
        [patch("app/Providers/AppServiceProvider.php", api_limiter())],
    )
}

/// Registers a 60 requests per minute `api` limiter keyed by user or IP.
fn api_limiter() -> TextPatch {
    TextPatch::new("RateLimiter::for")
        .insert_after(
            "use Illuminate\\Support\\ServiceProvider;",
            "\nuse Illuminate\\Support\\Facades\\RateLimiter;\
             \nuse Illuminate\\Http\\Request;\
             \nuse Illuminate\\Cache\\RateLimiting\\Limit;",
        )
        .insert_after(
            "public function boot(): void\n    {",
            "\n        RateLimiter::for('api', function (Request $request) {\
             \n            return Limit::perMinute(60)->by($request->user()?->id ?: $request->ip());\
             \n        });",
        )
}

fn health() -> StepRef {
    step(
        "health",
        [
            write(
                "app/Http/Controllers/Api/HealthController.php",
                include_str!("../../stubs/infra/HealthController.php"),
            ),
            Action::EnsureFile {
                path: API_ROUTES.into(),
                command: CommandSpec::artisan(["install:api", "--no-interaction"]),
            },
            patch(
                API_ROUTES,
                TextPatch::new("/health").append(
                    "\nRoute::get('/health', [\\App\\Http\\Controllers\\Api\\HealthController::class, 'check']);\n",
                ),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use laravelboot_core::domain::PatchOutcome;

    use super::*;

    const PROVIDER: &str = "<?php\n\nnamespace App\\Providers;\n\n\
use Illuminate\\Support\\ServiceProvider;\n\n\
class AppServiceProvider extends ServiceProvider\n{\n    \
public function boot(): void\n    {\n        //\n    }\n}\n";

    #[test]
    fn limiter_lands_inside_boot() {
        let PatchOutcome::Applied(patched) = api_limiter().apply(PROVIDER).unwrap() else {
            panic!("expected the patch to apply");
        };
        assert!(patched.contains(
            "use Illuminate\\Support\\ServiceProvider;\nuse Illuminate\\Support\\Facades\\RateLimiter;"
        ));
        assert!(patched.contains(
            "public function boot(): void\n    {\n        RateLimiter::for('api', function (Request $request) {"
        ));
        assert!(patched.contains("Limit::perMinute(60)"));
        assert_eq!(api_limiter().apply(&patched).unwrap(), PatchOutcome::AlreadyApplied);
    }

    #[test]
    fn limiter_requires_a_boot_method() {
        let without_boot = "<?php\nuse Illuminate\\Support\\ServiceProvider;\nclass P {}\n";
        assert!(api_limiter().apply(without_boot).is_err());
    }
}
