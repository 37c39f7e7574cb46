use jotter::identity::UserId;
use jotter::username_string::UsernameString;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoginResult {
    pub user: UserId,
    pub username: UsernameString,
    pub token: String,
}
