//! Effective limit resolution for private and public apps

use build_limits::{
    Application, Limit, LimitSource, Plan, Quota, User, DEVELOPER_PLAN, FREE_PLAN,
    ORGANIZATION_PLAN, PUBLIC_APP_PLAN,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_private_app_limit_is_the_users_plan() {
    init_tracing();
    for plan in Plan::ALL {
        let user = User::new(plan.limit());
        let app = user.upload_private_app();
        assert_eq!(
            app.limit(),
            plan.limit(),
            "private app of a {plan} user should use the {plan} plan"
        );
    }
}

#[test]
fn test_public_app_has_an_independent_default_limit() {
    for plan in Plan::ALL {
        let user = User::new(plan.limit());
        let app = user.upload_public_app();
        assert_eq!(
            app.limit(),
            PUBLIC_APP_PLAN,
            "public app of a {plan} user should use the public app plan"
        );
    }
}

#[test]
fn test_public_app_can_have_custom_limit() {
    init_tracing();
    let user = User::new(FREE_PLAN);
    let app = user.upload_public_app();

    app.customize_limit(ORGANIZATION_PLAN);

    assert_eq!(app.limit(), ORGANIZATION_PLAN);
    assert_eq!(app.limit_source(), LimitSource::Custom);
}

#[test]
fn test_public_app_can_opt_out_to_get_user_limit() {
    for plan in Plan::ALL {
        let user = User::new(plan.limit());
        let app = user.upload_public_app();

        app.opt_out_from_default_limits();

        assert_eq!(app.limit(), plan.limit());
    }
}

#[test]
fn test_public_app_can_opt_out_from_custom_limit() {
    let user = User::new(ORGANIZATION_PLAN);
    let app = user.upload_public_app();

    app.customize_limit(DEVELOPER_PLAN);
    app.opt_out_from_default_limits();

    assert_eq!(app.limit(), ORGANIZATION_PLAN);
    assert_eq!(app.limit_source(), LimitSource::Inherited);
}

#[test]
fn test_opted_out_public_app_keeps_plan_after_owner_rebinding() {
    let user = User::new(FREE_PLAN);
    let public = user.upload_public_app();
    let private = user.upload_private_app();
    public.opt_out_from_default_limits();

    user.change_plan(ORGANIZATION_PLAN);

    assert_eq!(public.limit(), FREE_PLAN);
    assert_eq!(private.limit(), ORGANIZATION_PLAN);
}

#[test]
fn test_private_app_limit_is_never_cached() {
    let user = User::new(FREE_PLAN);
    let app = user.upload_private_app();
    assert_eq!(app.limit(), FREE_PLAN);

    user.change_plan(DEVELOPER_PLAN);
    assert_eq!(app.limit(), DEVELOPER_PLAN);

    let custom = Limit::new(3, 30, Quota::Limited(1_000), Quota::Limited(5));
    user.change_plan(custom);
    assert_eq!(app.limit(), custom);
}

#[test]
fn test_returned_limit_is_a_copy() {
    let user = User::new(FREE_PLAN);
    let private = user.upload_private_app();
    let public = user.upload_public_app();

    let seen = private.limit().with_concurrent_builds(99);
    assert_eq!(seen.concurrent_builds(), 99);
    assert_eq!(private.limit(), FREE_PLAN);
    assert_eq!(user.plan(), FREE_PLAN);

    let seen = public.limit().with_builds_per_month(Quota::Limited(1));
    assert_eq!(seen.builds_per_month(), Quota::Limited(1));
    assert_eq!(public.limit(), PUBLIC_APP_PLAN);
}

#[test]
fn test_presets_are_shared_without_aliasing() {
    let free_a = User::new(FREE_PLAN);
    let free_b = User::new(FREE_PLAN);

    free_a.change_plan(ORGANIZATION_PLAN);

    assert_eq!(free_b.plan(), FREE_PLAN);
    assert_eq!(FREE_PLAN, Limit::new(1, 10, Quota::Limited(200), Quota::Limited(2)));
}

#[test]
fn test_public_apps_of_same_owner_are_independent() {
    let user = User::new(DEVELOPER_PLAN);
    let first = user.upload_public_app();
    let second = user.upload_public_app();

    first.customize_limit(ORGANIZATION_PLAN);
    second.opt_out_from_default_limits();
    let third = user.upload_public_app();

    assert_eq!(first.limit(), ORGANIZATION_PLAN);
    assert_eq!(second.limit(), DEVELOPER_PLAN);
    assert_eq!(third.limit(), PUBLIC_APP_PLAN);
    assert_eq!(third.limit_source(), LimitSource::Default);
}
