/// What the external identity provider reports for a signed-in caller.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
}
