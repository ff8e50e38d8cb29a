mod checkout_flow;
mod configuration;
mod file_backed_cart;
mod test_utils;
