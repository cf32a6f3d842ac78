use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use async_trait::async_trait;
use table_actor::{TableClient, TableError, TableHandle};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct CustomerClient {
    inner: TableClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: TableClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(customer_id = %id, "Customer created");
        Ok(id)
    }
}

#[async_trait]
impl TableHandle<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &TableClient<Customer> {
        &self.inner
    }

    fn map_error(e: TableError) -> CustomerError {
        match e {
            TableError::RowError(source) => match source.downcast::<CustomerError>() {
                Ok(row_error) => *row_error,
                Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
            },
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}
