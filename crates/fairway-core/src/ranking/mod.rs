pub mod record;
pub mod review;
pub mod score;
pub mod tier;

pub use record::CourseRanking;
pub use review::Review;
pub use score::RelativeScore;
pub use tier::Tier;
