//! User model → entity mapper

use yealp_core::entities::{Followee, User};
use yealp_core::value_objects::UserId;

use crate::models::{FolloweeModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.user_id),
            name: model.name,
            email: model.email,
            yealping_since: model.yealping_since,
            image_file: model.account_img_file,
        }
    }
}

impl From<FolloweeModel> for Followee {
    fn from(model: FolloweeModel) -> Self {
        Followee {
            user: model.user.into(),
            follow_since: model.follow_since,
        }
    }
}
