//! HTTP-level tests driving the full router over the in-memory store.

mod helpers;

mod ad_account_test;
mod guard_test;
mod health_test;
mod organization_test;
mod signin_test;
