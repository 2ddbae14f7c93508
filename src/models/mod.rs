pub mod draft;
pub mod record;
pub mod work_item;
pub mod worker;
