use crate::application::ports::ids::IdGenerator;
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
