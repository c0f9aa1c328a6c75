use tableau::rule::{self, Application, Expansion, Kind};
use tableau::symbol::{Op, Quantifier};
use tableau::token::Token;
use tableau::{heuristic, Error, Formula, Generator, Node, NodeId, ProofTree, Shape, Term};

fn fm(s: &str) -> Formula {
    s.parse().unwrap()
}

fn fms(ss: &[&str]) -> Vec<Formula> {
    ss.iter().map(|s| fm(s)).collect()
}

fn generate(premises: &[&str], conclusion: &str) -> Generator {
    let mut generator = Generator::new(fms(premises), fm(conclusion));
    generator.run();
    generator
}

#[test]
fn infix_to_prefix() {
    assert_eq!(fm("(P>(Q&R))"), fm(">P&QR"));
    assert_eq!(fm("P>Q&R"), fm(">P&QR"));
    assert_eq!(fm("(P+Q)&R"), fm("&+PQR"));
    // connectives of equal priority associate to the left
    assert_eq!(fm("P&Q&R"), fm("&&PQR"));
    assert_eq!(fm("~(P&Q)"), fm("~&PQ"));
    assert_eq!(fm("~P:Q"), fm(":~PQ"));
    assert_eq!(fm("(~@xFx)"), fm("~@xFx"));
    assert_eq!(fm("(@x~~Fx)"), fm("@x~~Fx"));
    assert_eq!(fm("~@xRx&Q"), fm("&~@xRxQ"));
    assert_eq!(fm("@x(Fx>Gx)"), fm("@x>FxGx"));
    assert_eq!(fm(" ( P > Q ) "), fm(">PQ"));
}

#[test]
fn alternative_syntax() {
    assert_eq!(fm("(P→Q)"), fm(">PQ"));
    assert_eq!(fm("¬P ∨ Q"), fm("+~PQ"));
    assert_eq!(fm("P↔Q∧R"), fm(":P&QR"));
    assert_eq!(fm("∀x∃yRxy"), fm("@x#yRxy"));
    assert_eq!(fm("R(a,b)"), fm("Rab"));
    assert_eq!(fm("R(ab2)"), fm("Rab2"));
    assert_eq!(fm("(R(a,b)&P)"), fm("&RabP"));
}

#[test]
fn ill_formed() {
    let bad = ["", "P&", "&PQR", "PQ", "(P&Q", "P&Q)", "p", "P$", "@Fx", "()", "~", "@x"];
    for s in bad {
        assert!(s.parse::<Formula>().is_err(), "{} was accepted", s);
    }
    assert!(matches!(Formula::parse("P&"), Err(Error::Formation(_))));
}

#[test]
fn tokens() {
    let x = Term::letter('x');
    let expected = [
        Token::Quant(Quantifier::Forall, x),
        Token::Bin(Op::Impl),
        Token::Atom('F', [x].into_iter().collect()),
        Token::Neg,
        Token::Atom('G', [x].into_iter().collect()),
    ];
    assert_eq!(fm("@x>Fx~Gx").tokens(), expected);

    let rab = fm("Ra1b");
    let args = [Term::new('a', 1), Term::letter('b')];
    assert_eq!(rab.tokens(), [Token::Atom('R', args.into_iter().collect())]);
    assert_eq!(rab.to_string(), "Ra1b");

    let built = Formula::from_tokens(expected.to_vec()).unwrap();
    assert_eq!(built, fm("@x>Fx~Gx"));
    assert!(Formula::from_tokens(Vec::from([Token::Neg])).is_err());
}

#[test]
fn major() {
    let f = fm(">P&QR");
    assert_eq!(f.major_operator(), Some(&Token::Bin(Op::Impl)));
    assert_eq!(f.major_operands(), fms(&["P", "&QR"]));

    let f = fm("~&PQ");
    assert_eq!(f.major_operator(), Some(&Token::Neg));
    assert_eq!(f.major_operands(), fms(&["&PQ"]));

    let f = fm("Rab");
    assert_eq!(f.major_operator(), None);
    assert_eq!(f.major_operands(), fms(&["Rab"]));

    let x = Term::letter('x');
    let shape = Shape::Quant(Quantifier::Exists, x, fm("&FxGx"));
    assert_eq!(fm("#x&FxGx").shape(), shape);
}

#[test]
fn constants() {
    let a = Term::letter('a');
    let x = Term::letter('x');
    assert_eq!(fm("@x>FxGa").constants(), Vec::from([a]));
    // `x` occurs free on the right
    assert_eq!(fm("&@xFxHx").constants(), Vec::from([x]));
    assert_eq!(fm("&RaaRxa").constants(), Vec::from([a, x]));
    assert!(fm("P").constants().is_empty());
}

#[test]
fn substitute() {
    let (x, a) = (Term::letter('x'), Term::letter('a'));
    assert_eq!(fm("&Fx@xGx").substitute(x, a), fm("&Fa@xGx"));
    assert_eq!(fm("#yRxy").substitute(x, a), fm("#yRay"));
    assert_eq!(fm("P").substitute(x, a), fm("P"));
}

#[test]
fn substitute_without_capture() {
    let (x, y, z) = (Term::letter('x'), Term::letter('y'), Term::letter('z'));
    assert_eq!(fm("#y~Rxy").substitute(x, y), fm("#a~Rya"));
    assert_eq!(fm("@y#zRxyz").substitute(x, z), fm("@y#aRzya"));
    // the renamed variable must not clash with terms of the body
    assert_eq!(fm("#y&RxyFa").substitute(x, y), fm("#b&RybFa"));
    // nothing to capture if the variable does not occur
    assert_eq!(fm("#yFy").substitute(x, y), fm("#yFy"));
}

#[test]
fn atoms() {
    assert!(fm("P").is_atom());
    assert!(fm("~Rab").is_atom());
    assert!(!fm("~~P").is_atom());
    assert!(!fm("&PQ").is_atom());
    assert!(!fm("@xFx").is_atom());

    assert!(fm("P").contradicts(&fm("~P")));
    assert!(fm("~Fa").contradicts(&fm("Fa")));
    assert!(!fm("Fa").contradicts(&fm("~Fb")));
    assert!(!fm("~P").contradicts(&fm("~~P")));
    assert!(!fm("&PQ").contradicts(&fm("~&PQ")));
}

#[test]
fn display() {
    let f = fm("(@x(Fx>~Gx)&(Pa:Q))");
    assert_eq!(f.to_string(), "&@x>Fx~Gx:PaQ");
    assert_eq!(f.infix().to_string(), "(∀x (Fx → ¬Gx) ∧ (Pa ↔ Q))");
    assert_eq!((-fm("P")).to_string(), "~P");
}

#[test]
fn fresh_terms() {
    let letters: Vec<_> = ('a'..='z').map(Term::letter).collect();
    assert_eq!(Term::fresh(&[]), Term::letter('a'));
    assert_eq!(Term::fresh(&letters), Term::new('a', 1));
    assert_eq!(Term::fresh(&letters).to_string(), "a1");
}

#[test]
fn node() {
    let mut node = Node::new(fms(&["&PQ", "~R"]));
    assert!(node.contains(&fm("~R")));

    node.tick(&fm("S"));
    assert!(!node.is_tried(&fm("S")));
    node.tick(&fm("&PQ"));
    assert!(node.is_tried(&fm("&PQ")));
    node.untick(&fm("&PQ"));
    assert!(!node.is_tried(&fm("&PQ")));

    assert!(!node.is_closed());
    node.close();
    assert!(node.is_closed());
    assert_eq!(node.to_string(), "&PQ, ~R [X]");

    assert!(node.contradicts(&Node::new(fms(&["R"]))));
    assert!(!node.contradicts(&Node::new(fms(&["P"]))));
}

#[test]
fn tree_links() {
    let mut tree = ProofTree::new(fms(&["P"]));
    let root = tree.root();
    let l = tree.add_child(root, Node::new(fms(&["Q"]))).unwrap();
    let r = tree.add_child(root, Node::new(fms(&["R"]))).unwrap();
    let third = tree.add_child(root, Node::new(fms(&["S"])));
    assert_eq!(third, Err(Error::InvalidOperation("too many children")));

    assert_eq!(tree.node(l).parent(), Some(root));
    assert_eq!(tree.node(root).children().collect::<Vec<_>>(), [l, r]);
    assert_eq!(tree.leaves_below(root), [l, r]);
    assert_eq!(tree.size(), 3);

    assert!(tree.remove_child(root, l));
    assert!(!tree.remove_child(root, l));
    assert_eq!(tree.node(l).parent(), None);
    assert_eq!(tree.leaves_below(root), [r]);
    assert_eq!(tree.size(), 2);

    // the freed slot can be used again
    let s = tree.add_child(root, Node::new(fms(&["S"]))).unwrap();
    assert_eq!(tree.leaves_below(root), [s, r]);
}

#[test]
fn tree_contradiction() {
    let mut tree = ProofTree::new(fms(&["P", "&QR"]));
    let root = tree.root();
    let child = tree.add_child(root, Node::new(fms(&["~P"]))).unwrap();
    assert!(!tree.contradiction_from(root));
    assert!(tree.contradiction_from(child));

    tree.close(child);
    assert!(tree.closes());
    assert_eq!(tree.open_nodes(), [root]);
    assert_eq!(tree.to_string(), "P, &QR\n|   ~P [X]\n");
}

#[test]
fn graft() {
    let mut tree = ProofTree::new(fms(&["+PQ", "~P"]));
    let root = tree.root();
    let split = Expansion::Split(fms(&["P"]), fms(&["Q"]));
    assert!(tree.graft_below(root, &split));
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.to_string(), "+PQ, ~P\n|   P [X]\n|   Q\n");

    // the open leaf already contains `Q`
    let leaf = tree.leaves_below(root)[0];
    assert!(tree.is_redundant(leaf, &split));
    assert!(!tree.graft_below(root, &split));
    assert_eq!(tree.size(), 3);

    let linear = Expansion::Linear(fms(&["R", "S"]));
    assert!(tree.graft_below(root, &linear));
    assert_eq!(tree.node(tree.leaves_below(root)[0]).formulae(), fms(&["R", "S"]));
}

fn apply(context: &[&str], f: &str) -> Option<Application> {
    let tree = ProofTree::new(fms(context));
    rule::apply(&tree, tree.root(), &fm(f))
}

fn expands(f: &str, expansion: Expansion) {
    let app = apply(&[f], f).unwrap();
    assert_eq!(app.expansion, expansion, "{}", f);
    assert!(app.tick);
}

#[test]
fn sentential_rules() {
    use Expansion::{Linear, Split};
    expands("+PQ", Split(fms(&["P"]), fms(&["Q"])));
    expands("&PQ", Linear(fms(&["P", "Q"])));
    expands(">PQ", Split(fms(&["~P"]), fms(&["Q"])));
    expands(":PQ", Split(fms(&["P", "Q"]), fms(&["~P", "~Q"])));
    expands("~+PQ", Linear(fms(&["~P", "~Q"])));
    expands("~&PQ", Split(fms(&["~P"]), fms(&["~Q"])));
    expands("~>PQ", Linear(fms(&["P", "~Q"])));
    expands("~:PQ", Split(fms(&["P", "~Q"]), fms(&["~P", "Q"])));
    expands("~~P", Linear(fms(&["P"])));
    assert_eq!(apply(&["P"], "P"), None);
    assert_eq!(apply(&["~P"], "~P"), None);
}

#[test]
fn quantifier_rules() {
    use Expansion::Linear;
    expands("~@xFx", Linear(fms(&["#x~Fx"])));
    expands("~#x&FxGx", Linear(fms(&["@x~&FxGx"])));

    // the instance constant is new to the branch
    let app = apply(&["#xFx", "Ga"], "#xFx").unwrap();
    assert_eq!(app.expansion, Linear(fms(&["Fb"])));
    assert!(app.tick);

    // instantiate with every constant on the branch, and stay untried
    let app = apply(&["@xFx", "Gb", "Hcb"], "@xFx").unwrap();
    assert_eq!(app.expansion, Linear(fms(&["Fb", "Fc"])));
    assert!(!app.tick);

    // a constant named like the inner variable is not captured
    let app = apply(&["@x#y~Rxy", "Sy"], "@x#y~Rxy").unwrap();
    assert_eq!(app.expansion, Linear(fms(&["#a~Rya"])));

    // without constants, some constant is made up
    let app = apply(&["@xRxx"], "@xRxx").unwrap();
    assert_eq!(app.expansion, Linear(fms(&["Raa"])));
}

#[test]
fn kinds() {
    let kinds = [
        ("P", Kind::Atomic),
        ("~P", Kind::Atomic),
        ("~@xFx", Kind::QuantNeg),
        ("~#xFx", Kind::QuantNeg),
        ("&PQ", Kind::Linear),
        ("~~P", Kind::Linear),
        ("~>PQ", Kind::Linear),
        ("#xFx", Kind::Exists),
        ("@xFx", Kind::Forall),
        ("+PQ", Kind::Split),
        ("~:PQ", Kind::Split),
    ];
    for (f, kind) in kinds {
        assert_eq!(Kind::of(&fm(f)), kind, "{}", f);
    }
}

#[test]
fn contradiction_heuristic() {
    let tree = ProofTree::new(fms(&[">PQ", "P", "~Q"]));
    assert!(heuristic::closes_every_branch(&tree, tree.root(), &fm(">PQ")));

    let tree = ProofTree::new(fms(&["+PQ", "~P"]));
    assert!(!heuristic::closes_every_branch(&tree, tree.root(), &fm("+PQ")));
    assert!(!heuristic::closes_every_branch(&tree, tree.root(), &fm("~P")));

    // the new branch closes only against the formulae it brings along
    let tree = ProofTree::new(fms(&["~+P~P"]));
    assert!(!heuristic::closes_every_branch(&tree, tree.root(), &fm("~+P~P")));
    let tree = ProofTree::new(fms(&["&P~P"]));
    assert!(heuristic::closes_every_branch(&tree, tree.root(), &fm("&P~P")));

    let names: Vec<_> = heuristic::PREFERENCES.iter().map(|p| p.name).collect();
    assert_eq!(names.len(), heuristic::COUNT);
    assert_eq!(names[0], "contradiction");
    assert_eq!(names[6], "wildcard");
}

#[test]
fn modus_ponens() {
    let generator = generate(&[">PQ", "P"], "Q");
    let tree = generator.tree();
    assert!(tree.closes());
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.to_string(), ">PQ, P, ~Q\n|   ~P [X]\n|   Q [X]\n");
    let infix = "(P → Q), P, ¬Q\n|   ¬P [X]\n|   Q [X]\n";
    assert_eq!(tree.render(true).to_string(), infix);
    assert_eq!(generator.stats().applications, [1, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn invalid_disjunction() {
    let generator = generate(&["+PQ"], "P");
    let tree = generator.tree();
    assert!(!tree.closes());
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.to_string(), "+PQ, ~P\n|   P [X]\n|   Q\n");
    assert_eq!(generator.stats().applications[5], 1);
}

#[test]
fn tautology() {
    let tree = tableau::prove(Vec::new(), fm("+P~P"));
    assert!(tree.closes());
    assert_eq!(tree.to_string(), "~+P~P\n|   ~P, ~~P\n|   |   P [X]\n");
}

#[test]
fn contradictory_premises() {
    let tree = tableau::prove(fms(&["P", "~P"]), fm("Q"));
    assert!(tree.closes());
    assert_eq!(tree.size(), 1);
}

#[test]
fn universal_instantiation() {
    let tree = tableau::prove(fms(&["@xRx"]), fm("Ra"));
    assert!(tree.closes());
    assert_eq!(tree.size(), 2);

    let tree = tableau::prove(fms(&["@x(Fx>Gx)", "Fa"]), fm("Ga"));
    assert!(tree.closes());

    let tree = tableau::prove(fms(&["@xFx"]), fm("Ga"));
    assert!(!tree.closes());
    assert_eq!(tree.to_string(), "@xFx, ~Ga\n|   Fa\n");
}

#[test]
fn quantifier_negation() {
    let tree = tableau::prove(fms(&["~#xFx"]), fm("~Fa"));
    assert!(tree.closes());

    let tree = tableau::prove(fms(&["~@x~Fx"]), fm("#xFx"));
    assert!(tree.closes());
}

#[test]
fn existential_freshness() {
    let tree = tableau::prove(fms(&["#xFx"]), fm("Fa"));
    assert!(!tree.closes());
    assert_eq!(tree.to_string(), "#xFx, ~Fa\n|   Fb\n");

    // the second witness must differ from the first one
    let tree = tableau::prove(fms(&["#xFx", "#x~Fx"]), fm("P"));
    assert!(!tree.closes());
}

#[test]
fn syllogism() {
    let premises = fms(&["@x(Hx>Mx)", "Hs"]);
    assert!(tableau::prove(premises, fm("Ms")).closes());

    let premises = fms(&["@x(Fx>Gx)", "@x(Gx>Hx)"]);
    assert!(tableau::prove(premises, fm("@x(Fx>Hx)")).closes());
}

#[test]
fn fixpoint() {
    let mut generator = Generator::new(fms(&["(P>Q)", "(Q>R)"]), fm("(P>R)"));
    generator.run();
    let size = generator.tree().size();
    assert!(generator.tree().closes());
    assert!(!generator.step());
    assert_eq!(generator.tree().size(), size);
}

#[test]
fn infinite() {
    let mut generator = Generator::new(fms(&["@x#yRxy"]), fm("P"));
    for _ in 0..20 {
        assert!(generator.step());
    }
    assert!(!generator.tree().closes());
    assert_eq!(generator.tree().size(), 21);
}

fn all_nodes(tree: &ProofTree) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = Vec::from([tree.root()]);
    while let Some(id) = stack.pop() {
        result.push(id);
        stack.extend(tree.node(id).children());
    }
    result
}

fn bounded(premises: &[&str], conclusion: &str, steps: usize) -> ProofTree {
    let mut generator = Generator::new(fms(premises), fm(conclusion));
    for _ in 0..steps {
        if !generator.step() {
            break;
        }
    }
    generator.into_tree()
}

fn sample_trees() -> Vec<ProofTree> {
    Vec::from([
        bounded(&[">PQ", "P"], "Q", 100),
        bounded(&["+PQ"], "P", 100),
        bounded(&[], "+P~P", 100),
        bounded(&["P", "~P"], "Q", 100),
        bounded(&[":PQ", "~&PQ"], "~+PQ", 100),
        bounded(&["@x(Fx>Gx)", "@x(Gx>Hx)"], "@x(Fx>Hx)", 100),
        bounded(&["~@x~Fx"], "#xFx", 100),
        bounded(&["#xFx", "#x~Fx"], "P", 100),
        bounded(&["@x#yRxy"], "P", 30),
    ])
}

#[test]
fn closed_nodes_contradict() {
    for tree in sample_trees() {
        for id in all_nodes(&tree) {
            if tree.node(id).is_closed() {
                assert!(tree.contradiction_from(id), "{} in\n{}", id, tree);
            }
        }
    }
}

#[test]
fn rendering_reparses() {
    for tree in sample_trees() {
        for id in all_nodes(&tree) {
            for f in tree.node(id).formulae() {
                assert_eq!(&fm(&f.to_string()), f);
                assert_eq!(&fm(&f.infix().to_string()), f);
            }
        }
    }

    let f = fm("&Fx#yRxy").substitute(Term::letter('x'), Term::new('b', 12));
    assert_eq!(f.to_string(), "&Fb12#yRb12y");
    assert_eq!(fm(&f.to_string()), f);
    assert_eq!(fm(&f.infix().to_string()), f);
}

#[test]
fn open_fixpoint() {
    for (premises, conclusion) in [(["+PQ"], "P"), (["@xFx"], "Ga")] {
        let mut generator = generate(&premises, conclusion);
        let before = generator.tree().to_string();
        assert!(!generator.tree().closes());
        assert!(!generator.step());
        assert_eq!(generator.tree().to_string(), before);
    }
}

#[test]
fn satisfiable_with_shared_letters() {
    // `y` is a constant here and a variable in the first premise
    let premises = ["@x#y~Rxy", "@xRxx", "Sy"];
    let tree = bounded(&premises, "Q", 40);
    assert!(!tree.closes(), "{}", tree);
}
