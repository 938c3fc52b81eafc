mod items;
mod projects;
mod submissions;

pub(crate) use items::PgSubmissionItemsRepository;
pub(crate) use projects::PgProjectsRepository;
pub(crate) use submissions::PgSubmissionsRepository;
