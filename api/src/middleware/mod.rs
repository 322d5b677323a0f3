mod cron;

pub use cron::cron_auth_middleware;
