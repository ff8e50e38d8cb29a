use crate::{infra::ClientError, string_id, uuid_id};

uuid_id!(LineItemId);

string_id!(AddOnId);
string_id!(BranchId);
string_id!(FoodItemId);
string_id!(RestaurantId);
string_id!(VariantId);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} cannot be blank.")]
pub struct BlankId(pub &'static str);

impl From<BlankId> for ClientError {
    fn from(value: BlankId) -> Self {
        ClientError::Validation(value.to_string())
    }
}
