mod bulk_delete;
mod hierarchy;
mod notifications;
