use super::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerPatch};
use async_trait::async_trait;
use table_actor::Row;

#[async_trait]
impl Row for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerPatch;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, CustomerError> {
        if params.name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        Ok(Customer {
            id,
            name: params.name,
            avatar: params.avatar,
        })
    }

    async fn on_update(&mut self, patch: CustomerPatch, _ctx: &()) -> Result<(), CustomerError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(CustomerError::EmptyName);
            }
            self.name = name;
        }
        if patch.avatar.is_some() {
            self.avatar = patch.avatar;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), CustomerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let err = Customer::from_create_params(
            CustomerId(1),
            CustomerCreate {
                name: "  ".into(),
                avatar: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, CustomerError::EmptyName);
    }

    #[tokio::test]
    async fn test_patch_keeps_avatar_when_absent() {
        let mut customer = Customer::from_create_params(
            CustomerId(1),
            CustomerCreate {
                name: "Table 4".into(),
                avatar: Some("t4.png".into()),
            },
        )
        .unwrap();

        customer
            .on_update(
                CustomerPatch {
                    name: Some("Table 4 (patio)".into()),
                    avatar: None,
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(customer.name, "Table 4 (patio)");
        assert_eq!(customer.avatar.as_deref(), Some("t4.png"));
    }
}
