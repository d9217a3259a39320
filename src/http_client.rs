use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const USER_AGENT: &str = "caiman";

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn client() -> &'static Client {
    CLIENT.get_or_init(init_client)
}

fn init_client() -> Client {
    Client::builder().user_agent(USER_AGENT).build().unwrap()
}
