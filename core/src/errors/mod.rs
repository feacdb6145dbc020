mod pledge_error;

pub use pledge_error::PledgeError;
