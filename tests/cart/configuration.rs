use food_cart::{domain::pricing::PaymentMethod, infra::get_config_settings};
use rust_decimal_macros::dec;
use serial_test::serial;

#[test]
#[serial]
fn test_environment_uses_its_own_directories() {
    // SAFETY: serialised with every other test touching the environment.
    unsafe { std::env::set_var("APP_ENVIRONMENT", "test") };

    let settings = get_config_settings();

    unsafe { std::env::remove_var("APP_ENVIRONMENT") };
    let settings = settings.expect("Settings should load.");
    assert_eq!(settings.environment, "test");
    assert!(
        settings
            .application
            .storage_directory
            .as_str()
            .ends_with("test-storage")
    );
    assert_eq!(settings.fees.platform_fee_tax_rate, dec!(0.18));
    assert_eq!(settings.checkout.payment_method, PaymentMethod::Cod);
}

#[test]
#[serial]
fn payment_method_can_be_overridden_from_the_environment() {
    // SAFETY: serialised with every other test touching the environment.
    unsafe { std::env::set_var("APP_CHECKOUT__PAYMENT_METHOD", "ONLINE") };

    let settings = get_config_settings();

    unsafe { std::env::remove_var("APP_CHECKOUT__PAYMENT_METHOD") };
    let settings = settings.expect("Settings should load.");
    assert_eq!(settings.checkout.payment_method, PaymentMethod::Online);
}
