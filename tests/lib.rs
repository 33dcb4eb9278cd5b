//! End-to-end sale lifecycle tests wiring the crowdsale engine to the real
//! capped token and vesting holder contracts.

#[cfg(test)]
mod lifecycle {
    use capped_token::{CappedToken, CappedTokenClient};
    use crowdsale::{Crowdsale, CrowdsaleClient, Error as SaleError};
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::{Address, Env, String};
    use token_vesting::{TokenVesting, TokenVestingClient};

    const DAY: u64 = 86_400;
    const YEAR: u64 = 365 * DAY;

    const RATE: i128 = 1000;
    // 0.42 of a 7-decimal payment asset.
    const PAYMENT: i128 = 4_200_000;
    const ALLOWANCE: i128 = 420_000_000_000;

    struct World {
        env: Env,
        sale: CrowdsaleClient<'static>,
        token: CappedTokenClient<'static>,
        payment: CappedTokenClient<'static>,
        vesting: TokenVestingClient<'static>,
        vesting_id: Address,
        admin: Address,
        wallet: Address,
        token_wallet: Address,
        opening: u64,
        closing: u64,
    }

    fn deploy() -> World {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let wallet = Address::generate(&env);
        let token_wallet = Address::generate(&env);

        let token_id = env.register_contract(None, CappedToken);
        let token = CappedTokenClient::new(&env, &token_id);
        token.initialize(
            &admin,
            &7u32,
            &String::from_str(&env, "HighBei Coin"),
            &String::from_str(&env, "HBC"),
            &1_000_000_000_000i128,
        );

        let payment_id = env.register_contract(None, CappedToken);
        let payment = CappedTokenClient::new(&env, &payment_id);
        payment.initialize(
            &admin,
            &7u32,
            &String::from_str(&env, "Payment"),
            &String::from_str(&env, "PAY"),
            &1_000_000_000_000i128,
        );

        let sale_id = env.register_contract(None, Crowdsale);
        let sale = CrowdsaleClient::new(&env, &sale_id);

        let vesting_id = env.register_contract(None, TokenVesting);
        let vesting = TokenVestingClient::new(&env, &vesting_id);
        vesting.initialize(&sale_id, &token_id);

        let now = env.ledger().timestamp();
        let opening = now + 1;
        let closing = now + 8 * DAY;

        sale.initialize(
            &opening,
            &closing,
            &RATE,
            &wallet,
            &payment_id,
            &token_id,
            &token_wallet,
            &vesting_id,
            &YEAR,
            &(2 * YEAR),
        );

        token.mint(&admin, &token_wallet, &ALLOWANCE);
        token.approve(&token_wallet, &sale_id, &ALLOWANCE, &10_000u32);

        World {
            env,
            sale,
            token,
            payment,
            vesting,
            vesting_id,
            admin,
            wallet,
            token_wallet,
            opening,
            closing,
        }
    }

    fn advance_to(env: &Env, timestamp: u64) {
        env.ledger().with_mut(|l| {
            l.timestamp = timestamp;
        });
    }

    #[test]
    fn full_sale_lifecycle() {
        let w = deploy();
        let investor = Address::generate(&w.env);
        w.payment.mint(&w.admin, &investor, &(10 * PAYMENT));

        // Before the opening tick nothing is accepted.
        assert!(!w.sale.is_open());
        let res = w.sale.try_buy(&investor, &PAYMENT);
        assert_eq!(res, Err(Ok(SaleError::SaleNotOpen.into())));

        // At the opening tick the purchase goes through at the fixed rate.
        advance_to(&w.env, w.opening);
        assert!(w.sale.is_open());
        let tokens = w.sale.buy(&investor, &PAYMENT);
        assert_eq!(tokens, PAYMENT * RATE);
        assert_eq!(w.sale.balance_of(&investor), PAYMENT * RATE);
        assert_eq!(w.sale.remaining_tokens(), ALLOWANCE - PAYMENT * RATE);
        assert_eq!(w.payment.balance(&w.wallet), PAYMENT);

        // One second past closing the sale has closed and finalizes once.
        advance_to(&w.env, w.closing + 1);
        assert!(w.sale.has_closed());
        assert!(!w.sale.is_open());
        let res = w.sale.try_buy(&investor, &PAYMENT);
        assert_eq!(res, Err(Ok(SaleError::SaleNotOpen.into())));

        w.sale.finalize();
        assert!(w.sale.is_finalized());
        assert_eq!(w.sale.try_finalize(), Err(Ok(SaleError::AlreadyFinalized.into())));

        // Unsold allowance never left the token wallet.
        assert_eq!(w.token.balance(&w.token_wallet), ALLOWANCE - PAYMENT * RATE);

        // The investor's grant releases through the holder: nothing before the
        // cliff, everything once the full vesting duration has elapsed.
        let purchase_time = w.opening;
        advance_to(&w.env, purchase_time + YEAR - 1);
        assert_eq!(w.vesting.releasable(&investor), 0);

        advance_to(&w.env, purchase_time + 2 * YEAR);
        let released = w.vesting.release(&investor);
        assert_eq!(released, PAYMENT * RATE);
        assert_eq!(w.token.balance(&investor), PAYMENT * RATE);
    }

    #[test]
    fn value_is_conserved_across_purchasers() {
        let w = deploy();
        let alice = Address::generate(&w.env);
        let bob = Address::generate(&w.env);
        w.payment.mint(&w.admin, &alice, &1_000_000);
        w.payment.mint(&w.admin, &bob, &1_000_000);

        advance_to(&w.env, w.opening);
        w.sale.buy(&alice, &100_000);
        w.sale.buy_tokens(&bob, &bob, &250_000);
        advance_to(&w.env, w.opening + DAY);
        w.sale.buy(&alice, &50_000);

        let raised = w.sale.total_raised();
        assert_eq!(raised, 400_000);
        assert_eq!(w.payment.balance(&w.wallet), raised);

        // Every token drawn from the allowance sits at the vesting contract,
        // split across exactly one holder per purchaser.
        let drawn = 400_000 * RATE;
        assert_eq!(w.token.balance(&w.vesting_id), drawn);
        assert_eq!(w.sale.remaining_tokens(), ALLOWANCE - drawn);

        let alice_schedule = w.vesting.schedule(&alice).unwrap();
        let bob_schedule = w.vesting.schedule(&bob).unwrap();
        assert_eq!(alice_schedule.total_amount, 150_000 * RATE);
        assert_eq!(bob_schedule.total_amount, 250_000 * RATE);
        assert_eq!(
            alice_schedule.total_amount + bob_schedule.total_amount,
            drawn
        );

        // Alice's two purchases share one holder with the original start time.
        assert_eq!(alice_schedule.start_time, w.opening);
        assert_eq!(w.sale.vesting_holder(&alice), Some(w.vesting_id.clone()));
    }
}
