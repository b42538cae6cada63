use std::sync::Arc;

use build_limits::{App, Application, Plan, PlanCatalog, PrivateApp, PublicApp, User};
use tracing::debug;

/// One user per plan tier, each owning a private app and a public app in
/// every limit state.
pub struct PlanFixture {
    pub catalog: PlanCatalog,
    pub tenants: Vec<TenantFixture>,
}

pub struct TenantFixture {
    pub plan: Plan,
    pub user: Arc<User>,
    pub private_app: PrivateApp,
    pub default_app: PublicApp,
    pub custom_app: PublicApp,
    pub inherited_app: PublicApp,
}

impl PlanFixture {
    pub fn new() -> Self {
        Self::from_catalog(PlanCatalog::default())
    }

    /// `custom_app`s get the next tier up (organization wraps to free) so
    /// their limit differs from the owner's.
    pub fn from_catalog(catalog: PlanCatalog) -> Self {
        let tenants = Plan::ALL
            .into_iter()
            .map(|plan| {
                let user = User::new(catalog.limit(plan));
                let custom_app = user.upload_public_app();
                custom_app.customize_limit(catalog.limit(next_tier(plan)));
                let inherited_app = user.upload_public_app();
                inherited_app.opt_out_from_default_limits();

                debug!(plan = %plan, user_id = %user.id(), "built tenant fixture");
                TenantFixture {
                    plan,
                    private_app: user.upload_private_app(),
                    default_app: user.upload_public_app(),
                    custom_app,
                    inherited_app,
                    user,
                }
            })
            .collect();

        Self { catalog, tenants }
    }

    pub fn tenant(&self, plan: Plan) -> &TenantFixture {
        self.tenants
            .iter()
            .find(|tenant| tenant.plan == plan)
            .expect("fixture covers every plan")
    }
}

impl Default for PlanFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantFixture {
    pub fn apps(&self) -> [&dyn Application; 4] {
        [
            &self.private_app,
            &self.default_app,
            &self.custom_app,
            &self.inherited_app,
        ]
    }
}

/// Uploads `count` apps for `user`, alternating private and public.
pub fn mixed_apps(user: &Arc<User>, count: usize) -> Vec<App> {
    (0..count)
        .map(|i| {
            let app = if i % 2 == 0 {
                App::from(user.upload_private_app())
            } else {
                App::from(user.upload_public_app())
            };
            debug!(
                app_id = %app.id(),
                visibility = %app.visibility(),
                "uploaded fixture app"
            );
            app
        })
        .collect()
}

pub fn next_tier(plan: Plan) -> Plan {
    match plan {
        Plan::Free => Plan::Developer,
        Plan::Developer => Plan::Organization,
        Plan::Organization => Plan::Free,
    }
}

/// JSON document accepted by `BUILD_PLANS_FILE`.
pub fn catalog_json(catalog: &PlanCatalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(catalog)
}
