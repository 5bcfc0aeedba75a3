pub(crate) mod health_check_controller;
pub(crate) mod jwt_controller;
pub(crate) mod meeting_controller;
pub(crate) mod user_controller;
pub(crate) mod webhook_controller;
