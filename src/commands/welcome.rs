//! Capability banner for `!welcome`.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::util::send_long_message;

const WELCOME: &str = "✨✨✨ **Welcome to Yelp Outreach Assistant!** ✨✨✨\n\n\
I'm here to help you effortlessly find local businesses and automate your outreach process. Whether you're:\n\n\
- 📦 **Comparing quotes across movers** for your upcoming relocation\n\
- 📊 **Searching for a new tax representative** to handle your finances\n\
- 🏢 **Looking for a real estate broker** to find your perfect office space\n\n\
I've got you covered!\n\n\
Here's how you can get started:\n\
1. Use the `!initiate` command to begin.\n\
2. Provide your business type and zip code.\n\
3. Answer a few quick questions to help me understand your needs.\n\
4. I'll find the top businesses on Yelp tailored to your requirements.\n\
5. You'll receive personalized outreach messages ready to send!\n\n\
Ready to simplify your search and outreach? Just type `!initiate` to begin! 🚀";

pub async fn run_prefix(ctx: &Context, msg: &Message) -> Result<()> {
    send_long_message(ctx, msg.channel_id, WELCOME).await
}
